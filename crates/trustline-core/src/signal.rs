//! Normalized evidence from the external identity and wallet sources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which external source produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    DeveloperHistory,
    QaReputation,
    OnChainActivity,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeveloperHistory => "developer_history",
            Self::QaReputation => "qa_reputation",
            Self::OnChainActivity => "on_chain_activity",
        }
    }
}

/// One normalized piece of evidence from a single source.
///
/// Produced once per aggregation request and immutable afterwards. A signal
/// is `present` only when its source call succeeded; a failed call records
/// the error text instead of aborting the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSignal {
    pub kind: SourceKind,
    pub present: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl SourceSignal {
    /// Signal for a source that returned data.
    pub fn present(kind: SourceKind, fields: Map<String, Value>) -> Self {
        Self {
            kind,
            present: true,
            fields,
            fetch_error: None,
        }
    }

    /// Signal for a source that was not queried (no identifier supplied).
    pub fn absent(kind: SourceKind) -> Self {
        Self {
            kind,
            present: false,
            fields: Map::new(),
            fetch_error: None,
        }
    }

    /// Signal for a source whose call failed or timed out.
    pub fn failed(kind: SourceKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            present: false,
            fields: Map::new(),
            fetch_error: Some(error.into()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Static social-graph claim attached to every profile.
///
/// No dedicated social source is wired in; this is a declared placeholder,
/// not an inferred signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialAttestation {
    pub linkedin_verified: bool,
    pub connections: String,
}

impl Default for SocialAttestation {
    fn default() -> Self {
        Self {
            linkedin_verified: true,
            connections: "500+".to_string(),
        }
    }
}

/// Merged set of all signals for one underwriting request.
///
/// A profile with zero present signals is still valid scoring input; the
/// rubric applies its empty-profile penalty instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationProfile {
    pub developer_history: SourceSignal,
    pub qa_reputation: SourceSignal,
    pub on_chain_activity: SourceSignal,
    pub social_attestation: SocialAttestation,
}

impl ReputationProfile {
    /// Number of sources that actually returned data.
    pub fn present_signals(&self) -> usize {
        [
            &self.developer_history,
            &self.qa_reputation,
            &self.on_chain_activity,
        ]
        .iter()
        .filter(|s| s.present)
        .count()
    }
}

/// Caller-supplied identifiers for one aggregation request. Every field is
/// optional; a missing identifier skips that source without a network call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}
