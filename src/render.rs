use serde::Serialize;

use crate::error::Result;
use crate::models::LanguageCount;
use crate::session::{AnalysisModal, Dashboard};

const BAR_WIDTH: usize = 30;

/// A finished analysis as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisEntry {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub dashboard: Dashboard<'a>,
    pub analyses: Vec<AnalysisEntry>,
}

/// Renders in the requested format (`json`, `markdown`, anything else is text).
pub fn render(report: &Report<'_>, format: &str) -> Result<String> {
    Ok(match format {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    })
}

pub fn format_text(report: &Report<'_>) -> String {
    let dashboard = &report.dashboard;
    let user = dashboard.user;
    let mut output = String::new();

    output.push_str(&format!("\n=== {} (@{}) ===\n", user.display_name(), user.login));
    output.push_str(&format!("{}\n\n", user.html_url));

    if let Some(ref bio) = user.bio {
        output.push_str(&format!("{}\n\n", bio));
    }
    if let Some(ref location) = user.location {
        output.push_str(&format!("Location: {}\n", location));
    }
    if let Some(ref company) = user.company {
        output.push_str(&format!("Company: {}\n", company));
    }
    if let Some(blog) = user.blog_url() {
        output.push_str(&format!("Blog: {}\n", blog));
    }
    output.push_str(&format!(
        "Repos: {}  Followers: {}  Following: {}\n",
        user.public_repos, user.followers, user.following
    ));

    if !dashboard.languages.is_empty() {
        output.push_str("\nMost Used Languages:\n");
        output.push_str(&language_bars(&dashboard.languages));
    }

    output.push_str(&format!(
        "\nRecent Repositories (total: {}):\n",
        dashboard.repositories.len()
    ));
    for repo in dashboard.repositories {
        output.push_str(&format!("  {} [{}]\n", repo.name, repo.visibility()));
        output.push_str(&format!(
            "      {}\n",
            repo.description.as_deref().unwrap_or("No description provided.")
        ));
        let mut stats = Vec::new();
        if let Some(ref language) = repo.language {
            stats.push(language.clone());
        }
        stats.push(format!("★ {}", repo.stargazers_count));
        stats.push(format!("forks {}", repo.forks_count));
        output.push_str(&format!("      {}\n", stats.join("  ")));
    }

    for analysis in &report.analyses {
        output.push_str(&format!("\n--- {} ---\n{}\n", analysis.title, analysis.text));
    }

    output
}

pub fn format_markdown(report: &Report<'_>) -> String {
    let dashboard = &report.dashboard;
    let user = dashboard.user;
    let mut output = String::new();

    output.push_str(&format!(
        "# {} ([@{}]({}))\n\n",
        user.display_name(),
        user.login,
        user.html_url
    ));
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("| Repos | Followers | Following |\n|-------|-----------|-----------|\n");
    output.push_str(&format!(
        "| {} | {} | {} |\n",
        user.public_repos, user.followers, user.following
    ));

    if !dashboard.languages.is_empty() {
        output.push_str("\n## Most Used Languages\n\n");
        output.push_str("| Language | Repositories |\n|----------|--------------|\n");
        for language in &dashboard.languages {
            output.push_str(&format!("| {} | {} |\n", language.name, language.count));
        }
    }

    output.push_str(&format!(
        "\n## Recent Repositories ({})\n\n",
        dashboard.repositories.len()
    ));
    output.push_str("| Repository | Visibility | Language | Stars | Forks | Description |\n");
    output.push_str("|------------|------------|----------|-------|-------|-------------|\n");
    for repo in dashboard.repositories {
        output.push_str(&format!(
            "| [{}]({}) | {} | {} | {} | {} | {} |\n",
            repo.name,
            repo.html_url,
            repo.visibility(),
            repo.language.as_deref().unwrap_or("-"),
            repo.stargazers_count,
            repo.forks_count,
            repo.description.as_deref().unwrap_or("No description provided.")
        ));
    }

    for analysis in &report.analyses {
        output.push_str(&format!("\n## {}\n\n{}\n", analysis.title, analysis.text));
    }

    output
}

/// Horizontal bar chart, bars scaled to the largest count.
pub fn language_bars(languages: &[LanguageCount]) -> String {
    let max = languages.iter().map(|l| l.count).max().unwrap_or(0);
    let total: usize = languages.iter().map(|l| l.count).sum();
    let name_width = languages.iter().map(|l| l.name.len()).max().unwrap_or(0);
    let mut output = String::new();

    for language in languages {
        let filled = if max == 0 {
            0
        } else {
            (language.count * BAR_WIDTH).div_ceil(max)
        };
        let percent = if total == 0 {
            0.0
        } else {
            language.count as f64 * 100.0 / total as f64
        };
        output.push_str(&format!(
            "  {:<width$} {} {} ({:.0}%)\n",
            language.name,
            "█".repeat(filled),
            language.count,
            percent,
            width = name_width
        ));
    }

    output
}

pub fn format_modal(modal: &AnalysisModal) -> String {
    if !modal.open {
        return String::new();
    }
    let body = if modal.is_analyzing() {
        "The AI is analyzing the data..."
    } else {
        modal.result.as_deref().unwrap_or("")
    };
    format!("\n✨ {}\n\n{}\n", modal.title, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::context::fixtures::session;
    use crate::session::AnalysisPhase;

    fn report(session: &crate::session::Session) -> Report<'_> {
        Report {
            dashboard: session.dashboard(),
            analyses: vec![AnalysisEntry {
                title: "AI Profile Analysis".to_string(),
                text: "Solid Rust work.".to_string(),
            }],
        }
    }

    #[test]
    fn test_text_report() {
        let session = session();
        let text = format_text(&report(&session));

        assert!(text.contains("=== Mona Lisa (@mona) ==="));
        assert!(text.contains("Blog: https://mona.dev"));
        assert!(text.contains("Recent Repositories (total: 4)"));
        assert!(text.contains("notes [Public]"));
        assert!(text.contains("--- AI Profile Analysis ---\nSolid Rust work."));
        // Rust is listed before TypeScript in the chart
        let rust = text.find("  Rust ").unwrap();
        let ts = text.find("  TypeScript ").unwrap();
        assert!(rust < ts);
    }

    #[test]
    fn test_missing_description_placeholder() {
        let mut session_repos = crate::session::context::fixtures::repositories();
        session_repos[0].description = None;
        let session = crate::session::Session::new(
            crate::session::context::fixtures::user("mona"),
            session_repos,
        );
        let text = format_markdown(&report(&session));
        assert!(text.contains("No description provided."));
        assert!(text.contains("| Rust | 2 |"));
    }

    #[test]
    fn test_json_report() {
        let session = session();
        let json = render(&report(&session), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dashboard"]["user"]["login"], "mona");
        assert_eq!(value["analyses"][0]["text"], "Solid Rust work.");
    }

    #[test]
    fn test_language_bars_scale_to_max() {
        let bars = language_bars(&[
            LanguageCount { name: "Go".into(), count: 2 },
            LanguageCount { name: "C".into(), count: 1 },
        ]);
        let lines: Vec<_> = bars.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[0].ends_with("2 (67%)"));
    }

    #[test]
    fn test_modal_rendering() {
        let mut modal = AnalysisModal {
            open: true,
            title: "Repository Analysis: lens".to_string(),
            phase: AnalysisPhase::Analyzing,
            result: None,
            active_ticket: Some(1),
        };
        assert!(format_modal(&modal).contains("analyzing"));

        modal.phase = AnalysisPhase::Idle;
        modal.result = Some("Add tests.".to_string());
        assert!(format_modal(&modal).ends_with("Add tests.\n"));

        modal.open = false;
        assert_eq!(format_modal(&modal), "");
    }
}
