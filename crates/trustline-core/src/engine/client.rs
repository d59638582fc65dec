//! Chat-completions transport for the scoring engine.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Transport seam for the scoring engine. Implemented by the HTTP client
/// below and by in-memory mocks in tests.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one system + user message pair and return the raw reply text.
    async fn complete(&self, system_prompt: &str, user_payload: &str) -> anyhow::Result<String>;

    fn provider_name(&self) -> &'static str;
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiChatClient {
    url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, system_prompt: &str, user_payload: &str) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_payload},
            ],
            "temperature": 1.0,
            "top_p": 0.95,
        });

        debug!(url = %self.url, model = %self.model, "calling scoring engine");
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("scoring engine error (status {}): {}", status, error_text);
        }

        let reply: serde_json::Value = response.json().await?;
        let content = reply
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("scoring engine reply missing message content"))?;

        Ok(content.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_bearer_auth_and_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}],
            })))
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new(
            reqwest::Client::new(),
            format!("{}/v1/chat/completions", server.uri()),
            "test-model",
            "secret-key",
        );
        let reply = client.complete("system", "user").await.unwrap();
        assert_eq!(reply, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn non_success_status_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new(
            reqwest::Client::new(),
            server.uri(),
            "test-model",
            "secret-key",
        );
        let err = client.complete("system", "user").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }

    #[tokio::test]
    async fn reply_without_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = OpenAiChatClient::new(
            reqwest::Client::new(),
            server.uri(),
            "test-model",
            "secret-key",
        );
        let err = client.complete("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("missing message content"));
    }
}
