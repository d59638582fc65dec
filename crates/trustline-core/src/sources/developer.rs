//! Developer-history collector (GitHub-style profile API).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map};
use tracing::{debug, warn};

use crate::signal::{SourceKind, SourceSignal};

const USER_AGENT_VALUE: &str = concat!("trustline/", env!("CARGO_PKG_VERSION"));

/// Seconds per fractional year (365.25 days).
const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

#[derive(Debug, Deserialize)]
struct DeveloperProfile {
    created_at: DateTime<Utc>,
    #[serde(default)]
    public_repos: u64,
    #[serde(default)]
    followers: u64,
}

/// Read-only profile lookup by username.
#[derive(Debug, Clone)]
pub struct DeveloperHistorySource {
    client: reqwest::Client,
    base_url: String,
}

impl DeveloperHistorySource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and normalize one developer profile.
    ///
    /// Account age is reported in fractional years, rounded to two
    /// decimals; repo and follower counts pass through as raw counts.
    pub async fn collect(&self, username: Option<&str>) -> SourceSignal {
        let username = match username {
            Some(u) if !u.trim().is_empty() => u.trim(),
            _ => return SourceSignal::absent(SourceKind::DeveloperHistory),
        };

        match self.fetch(username).await {
            Ok(profile) => {
                let age_secs = (Utc::now() - profile.created_at).num_seconds() as f64;
                let account_age_years = round2(age_secs / SECONDS_PER_YEAR);
                debug!(username, account_age_years, "developer profile fetched");

                let mut fields = Map::new();
                fields.insert("username".into(), json!(username));
                fields.insert("account_age_years".into(), json!(account_age_years));
                fields.insert("public_repos".into(), json!(profile.public_repos));
                fields.insert("followers".into(), json!(profile.followers));
                SourceSignal::present(SourceKind::DeveloperHistory, fields)
            }
            Err(err) => {
                warn!(username, error = %err, "developer-history lookup failed");
                SourceSignal::failed(SourceKind::DeveloperHistory, err.to_string())
            }
        }
    }

    async fn fetch(&self, username: &str) -> anyhow::Result<DeveloperProfile> {
        let url = format!("{}/users/{}", self.base_url, username);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
