//! Q&A-reputation collector (Stack Exchange-style API).

use serde::Deserialize;
use serde_json::{json, Map};
use tracing::{debug, warn};

use crate::signal::{SourceKind, SourceSignal};

#[derive(Debug, Deserialize)]
struct QaLookupResponse {
    #[serde(default)]
    items: Vec<QaUser>,
}

#[derive(Debug, Deserialize)]
struct QaUser {
    #[serde(default)]
    reputation: u64,
    #[serde(default)]
    badge_counts: BadgeCounts,
}

#[derive(Debug, Default, Deserialize)]
struct BadgeCounts {
    #[serde(default)]
    gold: u64,
    #[serde(default)]
    silver: u64,
    #[serde(default)]
    bronze: u64,
}

/// Read-only reputation lookup by numeric user id.
#[derive(Debug, Clone)]
pub struct QaReputationSource {
    client: reqwest::Client,
    base_url: String,
}

impl QaReputationSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one user's reputation score and badge counts, passed through
    /// verbatim.
    pub async fn collect(&self, user_id: Option<u64>) -> SourceSignal {
        let user_id = match user_id {
            Some(id) => id,
            None => return SourceSignal::absent(SourceKind::QaReputation),
        };

        match self.fetch(user_id).await {
            Ok(user) => {
                debug!(user_id, reputation = user.reputation, "qa profile fetched");
                let mut fields = Map::new();
                fields.insert("user_id".into(), json!(user_id));
                fields.insert("reputation".into(), json!(user.reputation));
                fields.insert("badges_gold".into(), json!(user.badge_counts.gold));
                fields.insert("badges_silver".into(), json!(user.badge_counts.silver));
                fields.insert("badges_bronze".into(), json!(user.badge_counts.bronze));
                SourceSignal::present(SourceKind::QaReputation, fields)
            }
            Err(err) => {
                warn!(user_id, error = %err, "qa-reputation lookup failed");
                SourceSignal::failed(SourceKind::QaReputation, err.to_string())
            }
        }
    }

    async fn fetch(&self, user_id: u64) -> anyhow::Result<QaUser> {
        let url = format!(
            "{}/2.3/users/{}?site=stackoverflow",
            self.base_url, user_id
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: QaLookupResponse = response.json().await?;
        body.items
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("user {} not found", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> QaReputationSource {
        QaReputationSource::new(reqwest::Client::new(), server.uri())
    }

    #[tokio::test]
    async fn missing_id_returns_absent_without_network_call() {
        let server = MockServer::start().await;
        let signal = source(&server).collect(None).await;
        assert!(!signal.present);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reputation_and_badges_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.3/users/22656"))
            .and(query_param("site", "stackoverflow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "reputation": 1444575,
                    "badge_counts": {"gold": 859, "silver": 9293, "bronze": 9341},
                }]
            })))
            .mount(&server)
            .await;

        let signal = source(&server).collect(Some(22656)).await;
        assert!(signal.present);
        assert_eq!(signal.field("reputation"), Some(&serde_json::json!(1444575)));
        assert_eq!(signal.field("badges_gold"), Some(&serde_json::json!(859)));
    }

    #[tokio::test]
    async fn empty_items_degrades_to_failed_signal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.3/users/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})),
            )
            .mount(&server)
            .await;

        let signal = source(&server).collect(Some(1)).await;
        assert!(!signal.present);
        assert!(signal.fetch_error.unwrap().contains("not found"));
    }
}
