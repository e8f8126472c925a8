pub mod api;
pub mod client;
pub mod rate_limit;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use rate_limit::{RateLimitSnapshot, RateLimitTracker};
