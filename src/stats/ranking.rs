use crate::models::{Repository, TopRepository};

/// Number of repositories included in the profile analysis context.
pub const PROFILE_TOP_REPOS: usize = 5;

/// Returns the `n` most-starred repositories, most stars first.
///
/// The sort is stable, so repositories with equal star counts keep the order
/// GitHub returned them in (most recently updated first). The input is left untouched.
pub fn top_repositories_by_stars(repos: &[Repository], n: usize) -> Vec<TopRepository> {
    let mut ranked: Vec<&Repository> = repos.iter().collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.into_iter().take(n).map(TopRepository::from).collect()
}
