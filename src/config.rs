use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ANALYSIS_LANGUAGE: &str = "Portuguese";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub analysis_language: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let github_token = get("GITHUB_TOKEN");

        let github_api_url = get("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
        let github_api_url = normalize_url("GITHUB_API_URL", github_api_url)?;

        let gemini_api_key = get("GEMINI_API_KEY").or_else(|| get("API_KEY"));

        let gemini_api_url = get("GEMINI_API_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string());
        let gemini_api_url = normalize_url("GEMINI_API_URL", gemini_api_url)?;

        let gemini_model = get("GEMINI_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let analysis_language = get("ANALYSIS_LANGUAGE")
            .unwrap_or_else(|| DEFAULT_ANALYSIS_LANGUAGE.to_string());

        Ok(Self {
            github_token,
            github_api_url,
            gemini_api_key,
            gemini_api_url,
            gemini_model,
            analysis_language,
        })
    }
}

fn normalize_url(key: &str, url: String) -> Result<String> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            key, url
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl From<&Config> for GeminiConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_api_url.clone(),
            model: config.gemini_model.clone(),
        }
    }
}
