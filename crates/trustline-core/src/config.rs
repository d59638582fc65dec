//! Pipeline configuration.
//!
//! All of it is read once at startup and immutable afterwards; concurrent
//! requests share a single config behind the pipeline.

use serde::{Deserialize, Serialize};

fn default_developer_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_qa_api_url() -> String {
    "https://api.stackexchange.com".to_string()
}

fn default_ledger_rpc_url() -> String {
    "https://mainnet.helius-rpc.com".to_string()
}

fn default_engine_api_url() -> String {
    "https://hackeurope.crusoecloud.com/v1/chat/completions".to_string()
}

fn default_engine_model() -> String {
    "NVFP4/Qwen3-235B-A22B-Instruct-2507-FP4".to_string()
}

fn default_source_timeout() -> u64 {
    10
}

fn default_engine_timeout() -> u64 {
    30
}

/// Configuration for the underwriting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Developer-history profile API base URL.
    #[serde(default = "default_developer_api_url")]
    pub developer_api_url: String,

    /// Q&A reputation API base URL.
    #[serde(default = "default_qa_api_url")]
    pub qa_api_url: String,

    /// Ledger JSON-RPC endpoint (balance and asset-ownership reads).
    #[serde(default = "default_ledger_rpc_url")]
    pub ledger_rpc_url: String,

    /// Ledger RPC API key, appended as a query parameter when set.
    #[serde(default)]
    pub ledger_api_key: Option<String>,

    /// Scoring-engine chat-completions endpoint.
    #[serde(default = "default_engine_api_url")]
    pub engine_api_url: String,

    /// Scoring-engine credential. The pipeline refuses underwriting
    /// requests when this is unset.
    #[serde(default)]
    pub engine_api_key: Option<String>,

    /// Scoring-engine model identifier.
    #[serde(default = "default_engine_model")]
    pub engine_model: String,

    /// Per-collector call timeout in seconds.
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,

    /// Scoring-engine call timeout in seconds.
    #[serde(default = "default_engine_timeout")]
    pub engine_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            developer_api_url: default_developer_api_url(),
            qa_api_url: default_qa_api_url(),
            ledger_rpc_url: default_ledger_rpc_url(),
            ledger_api_key: None,
            engine_api_url: default_engine_api_url(),
            engine_api_key: None,
            engine_model: default_engine_model(),
            source_timeout_secs: default_source_timeout(),
            engine_timeout_secs: default_engine_timeout(),
        }
    }
}

impl Config {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TRUSTLINE_DEVELOPER_API_URL` | Developer-history API base URL |
    /// | `TRUSTLINE_QA_API_URL` | Q&A reputation API base URL |
    /// | `TRUSTLINE_LEDGER_RPC_URL` | Ledger JSON-RPC endpoint |
    /// | `TRUSTLINE_LEDGER_API_KEY` | Ledger RPC API key |
    /// | `TRUSTLINE_ENGINE_API_URL` | Scoring-engine endpoint |
    /// | `TRUSTLINE_ENGINE_API_KEY` | Scoring-engine credential (required for underwriting) |
    /// | `TRUSTLINE_ENGINE_MODEL` | Scoring-engine model id |
    pub fn from_env() -> Self {
        Self {
            developer_api_url: std::env::var("TRUSTLINE_DEVELOPER_API_URL")
                .unwrap_or_else(|_| default_developer_api_url()),
            qa_api_url: std::env::var("TRUSTLINE_QA_API_URL")
                .unwrap_or_else(|_| default_qa_api_url()),
            ledger_rpc_url: std::env::var("TRUSTLINE_LEDGER_RPC_URL")
                .unwrap_or_else(|_| default_ledger_rpc_url()),
            ledger_api_key: std::env::var("TRUSTLINE_LEDGER_API_KEY").ok(),
            engine_api_url: std::env::var("TRUSTLINE_ENGINE_API_URL")
                .unwrap_or_else(|_| default_engine_api_url()),
            engine_api_key: std::env::var("TRUSTLINE_ENGINE_API_KEY").ok(),
            engine_model: std::env::var("TRUSTLINE_ENGINE_MODEL")
                .unwrap_or_else(|_| default_engine_model()),
            source_timeout_secs: std::env::var("TRUSTLINE_SOURCE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_source_timeout),
            engine_timeout_secs: std::env::var("TRUSTLINE_ENGINE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_engine_timeout),
        }
    }

    /// Set the developer-history API base URL.
    pub fn with_developer_api_url(mut self, url: impl Into<String>) -> Self {
        self.developer_api_url = url.into();
        self
    }

    /// Set the Q&A reputation API base URL.
    pub fn with_qa_api_url(mut self, url: impl Into<String>) -> Self {
        self.qa_api_url = url.into();
        self
    }

    /// Set the ledger JSON-RPC endpoint.
    pub fn with_ledger_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.ledger_rpc_url = url.into();
        self
    }

    /// Set the scoring-engine endpoint.
    pub fn with_engine_api_url(mut self, url: impl Into<String>) -> Self {
        self.engine_api_url = url.into();
        self
    }

    /// Set the scoring-engine credential.
    pub fn with_engine_api_key(mut self, key: impl Into<String>) -> Self {
        self.engine_api_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn default_config_has_no_engine_credential() {
        let cfg = Config::default();
        assert!(cfg.engine_api_key.is_none());
        assert_eq!(cfg.source_timeout_secs, 10);
        assert_eq!(cfg.engine_timeout_secs, 30);
    }

    #[test]
    fn builders_override_defaults() {
        let cfg = Config::default()
            .with_engine_api_key("k")
            .with_engine_api_url("http://localhost:9999/v1/chat/completions");
        assert_eq!(cfg.engine_api_key.as_deref(), Some("k"));
        assert!(cfg.engine_api_url.starts_with("http://localhost"));
    }
}
