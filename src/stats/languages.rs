use crate::models::{LanguageCount, Repository};

/// Number of slices shown in the language chart.
pub const CHART_LANGUAGE_LIMIT: usize = 6;

/// Counts repositories per primary language, most common first.
///
/// Repositories without a detected language are skipped. Languages with equal
/// counts stay in the order they were first seen.
pub fn language_histogram(repos: &[Repository], limit: usize) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();

    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|c| c.name == language) {
            Some(entry) => entry.count += 1,
            None => counts.push(LanguageCount {
                name: language.to_string(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
