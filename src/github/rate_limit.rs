use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use std::sync::{Mutex, PoisonError};

/// Quota figures GitHub reports on every REST response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub limit: Option<u32>,
    pub remaining: u32,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitSnapshot {
    /// Returns `None` when the response carries no `x-ratelimit-remaining` header.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        let remaining = number("x-ratelimit-remaining")?;
        let limit = number("x-ratelimit-limit").and_then(|v| u32::try_from(v).ok());
        let reset_at = number("x-ratelimit-reset")
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());

        Some(Self {
            limit,
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
            reset_at,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Keeps the most recent snapshot seen by a client. Purely observational.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    latest: Mutex<Option<RateLimitSnapshot>>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, headers: &HeaderMap) {
        let Some(snapshot) = RateLimitSnapshot::from_headers(headers) else {
            return;
        };

        tracing::debug!(
            remaining = snapshot.remaining,
            limit = ?snapshot.limit,
            reset_at = ?snapshot.reset_at,
            "GitHub rate limit"
        );
        if snapshot.is_exhausted() {
            tracing::warn!("GitHub rate limit exhausted, resets at {:?}", snapshot.reset_at);
        }

        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    pub fn latest(&self) -> Option<RateLimitSnapshot> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
