use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use repolens::render::{self, AnalysisEntry, Report};
use repolens::{
    console, AnalysisOutcome, Analyzer, Config, GeminiConfig, GeminiProvider, GitHubClient,
    SessionController,
};

#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(version)]
#[command(about = "Browse a GitHub profile and get AI reviews of it and its repositories")]
struct Args {
    /// GitHub username to load
    #[arg(short, long)]
    username: Option<String>,

    /// Personal access token (defaults to GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Request an AI analysis of the whole profile
    #[arg(long)]
    analyze_profile: bool,

    /// Request an AI review of a repository (repeatable)
    #[arg(long, value_name = "NAME")]
    analyze_repo: Vec<String>,

    /// Start an interactive session instead of a one-shot report
    #[arg(long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("repolens=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, analysis requests will fail");
    }

    let github = Arc::new(GitHubClient::new(&config.github_api_url)?);
    let provider = GeminiProvider::new(GeminiConfig::from(&config))?;
    let analyzer = Analyzer::new(Arc::new(provider), config.analysis_language.clone());
    let controller = Arc::new(SessionController::new(github.clone(), analyzer));

    if args.interactive {
        console::run_interactive(controller, args.format.clone()).await?;
        return Ok(());
    }

    let username = args
        .username
        .clone()
        .context("--username is required unless --interactive is given")?;
    let token = args.token.clone().or_else(|| config.github_token.clone());

    let spinner = spinner(format!("Connecting to GitHub as {}...", username))?;
    let login = controller.login(&username, token.as_deref()).await;
    spinner.finish_and_clear();
    login?;

    if let Some(quota) = github.rate_limit() {
        match quota.limit {
            Some(limit) => tracing::info!("GitHub API quota: {}/{} remaining", quota.remaining, limit),
            None => tracing::info!("GitHub API quota: {} remaining", quota.remaining),
        }
    }

    let mut analyses = Vec::new();

    if args.analyze_profile {
        let spinner = self::spinner("Analyzing profile...".to_string())?;
        let outcome = controller.analyze_profile().await;
        spinner.finish_and_clear();
        collect(&controller, outcome?, &mut analyses).await;
    }

    for name in &args.analyze_repo {
        let spinner = self::spinner(format!("Analyzing {}...", name))?;
        let outcome = controller.analyze_repo(name).await;
        spinner.finish_and_clear();
        collect(&controller, outcome?, &mut analyses).await;
        controller.close_modal().await;
    }

    let state = controller.snapshot().await;
    let session = state.session().context("login did not produce a session")?;
    let report = Report {
        dashboard: session.dashboard(),
        analyses,
    };
    let output = render::render(&report, &args.format)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn collect(
    controller: &SessionController,
    outcome: AnalysisOutcome,
    analyses: &mut Vec<AnalysisEntry>,
) {
    match outcome {
        AnalysisOutcome::Displayed(text) => {
            let title = controller.snapshot().await.modal.title;
            analyses.push(AnalysisEntry { title, text });
        }
        AnalysisOutcome::Skipped => tracing::info!("No repositories to analyze"),
        AnalysisOutcome::Discarded => {}
    }
}

fn spinner(message: String) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
