pub mod languages;
pub mod ranking;

pub use languages::{language_histogram, CHART_LANGUAGE_LIMIT};
pub use ranking::{top_repositories_by_stars, PROFILE_TOP_REPOS};
