/// A fixed prompt with two slots: `{language}` for the response language and
/// `{context}` for the serialized analysis context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub body: &'static str,
    pub temperature: Option<f32>,
    /// Shown when the provider returns no text.
    pub empty_fallback: &'static str,
    /// Shown when the request itself fails.
    pub failure_message: &'static str,
}

impl PromptTemplate {
    pub fn render(&self, context_json: &str, language: &str) -> String {
        // context goes in last so its contents are never rescanned for slots
        self.body
            .replace("{language}", language)
            .replace("{context}", context_json)
    }
}

pub const PROFILE_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "profile",
    body: r#"You are an experienced Senior Software Engineer and Tech Lead.
Analyze the following GitHub profile, provided as JSON.

Profile data: {context}

Write a professional analysis in {language} with the following structure:
1. **Developer Summary**: What kind of developer does this person appear to be, based on their repositories and languages? (e.g. Fullstack, Backend, Data-focused.)
2. **Strengths**: What stands out positively?
3. **Career Suggestion**: Based on what you see, what would be a good next step or technology to learn?
4. **Project Idea**: Suggest a project that combines the user's current technologies with something new.

Keep the tone encouraging, technical but approachable. Use Markdown for formatting."#,
    temperature: Some(0.7),
    empty_fallback: "Could not generate the analysis.",
    failure_message: "Error generating analysis. Please try again.",
};

pub const REPO_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "repository",
    body: r#"You are an Open Source code specialist. Analyze the metadata of this GitHub repository (provided as JSON) and give short, direct feedback.

Repository data: {context}

Answer in {language}, covering:
1. **Perceived Purpose**: What does this project appear to do?
2. **Tech Stack**: A brief comment on the main language.
3. **Improvement Tips**: 2 or 3 quick suggestions to make the repository more attractive (e.g. improve the README, add tests, topics).

Be concise. Use Markdown."#,
    temperature: None,
    empty_fallback: "Could not analyze the repository.",
    failure_message: "Error analyzing repository. Please try again.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_interpolates_context_verbatim() {
        let context = r#"{"name":"x","description":"uses {language} literally"}"#;
        let prompt = REPO_TEMPLATE.render(context, "English");

        assert!(prompt.contains(&format!("Repository data: {}", context)));
        assert!(prompt.contains("Answer in English"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn test_template_sampling() {
        assert_eq!(PROFILE_TEMPLATE.temperature, Some(0.7));
        assert_eq!(REPO_TEMPLATE.temperature, None);
        assert_ne!(PROFILE_TEMPLATE.failure_message, REPO_TEMPLATE.failure_message);
    }
}
