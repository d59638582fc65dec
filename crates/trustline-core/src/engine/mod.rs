//! Scoring-engine client.
//!
//! The engine is an external text-generation service treated as an oracle
//! for the trust score and its narrative. Everything derivable from the
//! score is recomputed locally by [`crate::rubric`]; the engine's reply is
//! parsed and validated here, never trusted for arithmetic.

mod client;
mod parse;
mod prompt;

pub use client::{ChatClient, OpenAiChatClient};
pub use parse::{extract_verdict, AssetClassification, EnginePricing, EngineTerms, EngineVerdict};
pub use prompt::{build_user_payload, RUBRIC_VERSION, SYSTEM_PROMPT};

use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::signal::ReputationProfile;

/// Underwriting scorer backed by a chat-completions endpoint.
pub struct ScoringEngine {
    client: Option<Arc<dyn ChatClient>>,
}

impl ScoringEngine {
    pub fn new(client: Option<Arc<dyn ChatClient>>) -> Self {
        Self { client }
    }

    /// Whether a credentialed client is wired in.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Submit one profile + collateral asset and return the engine's
    /// validated verdict.
    ///
    /// The reply is free-form text expected to contain exactly one JSON
    /// object; a reply without one is a terminal contract violation for
    /// this attempt, with no retry.
    pub async fn score(
        &self,
        profile: &ReputationProfile,
        collateral_asset: &str,
    ) -> PipelineResult<EngineVerdict> {
        let client = self.client.as_ref().ok_or_else(|| {
            PipelineError::configuration("scoring engine credential is not configured")
        })?;

        let payload = prompt::build_user_payload(profile, collateral_asset);
        let reply = client
            .complete(prompt::SYSTEM_PROMPT, &payload)
            .await
            .map_err(|e| PipelineError::engine(e.to_string()))?;

        parse::extract_verdict(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{SocialAttestation, SourceKind, SourceSignal};
    use async_trait::async_trait;

    fn empty_profile() -> ReputationProfile {
        ReputationProfile {
            developer_history: SourceSignal::absent(SourceKind::DeveloperHistory),
            qa_reputation: SourceSignal::absent(SourceKind::QaReputation),
            on_chain_activity: SourceSignal::absent(SourceKind::OnChainActivity),
            social_attestation: SocialAttestation::default(),
        }
    }

    struct FixedReply(String);

    #[async_trait]
    impl ChatClient for FixedReply {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn unconfigured_engine_fails_before_any_call() {
        let engine = ScoringEngine::new(None);
        let err = engine.score(&empty_profile(), "BTC").await.unwrap_err();
        assert!(matches!(err, PipelineError::Configuration { .. }));
    }

    #[tokio::test]
    async fn prose_wrapped_reply_still_parses() {
        let reply = format!(
            "Here is my assessment:\n{}\nLet me know if you need anything else.",
            serde_json::json!({
                "calculated_trust_score": 400,
                "scoring_reasoning": "base 500 minus empty-profile penalty",
                "asset_classification": {"block": "BLOCK III", "volatility_description": "crypto"},
                "underwriting_decision": {
                    "trust_tier": "Tier 3",
                    "required_collateral_percentage": 220,
                    "liquidation_threshold_percentage": 115,
                },
                "pricing_array_percentages": {
                    "1_month": 1.75, "3_month": 4.9, "6_month": 9.1, "12_month": 17.15,
                },
            })
        );
        let engine = ScoringEngine::new(Some(std::sync::Arc::new(FixedReply(reply))));
        let verdict = engine.score(&empty_profile(), "BTC").await.unwrap();
        assert_eq!(verdict.calculated_trust_score, 400.0);
    }

    #[tokio::test]
    async fn reply_without_json_is_a_contract_violation() {
        let engine = ScoringEngine::new(Some(std::sync::Arc::new(FixedReply(
            "I cannot produce a decision right now.".to_string(),
        ))));
        let err = engine.score(&empty_profile(), "BTC").await.unwrap_err();
        match err {
            PipelineError::UpstreamContract { raw, .. } => {
                assert!(raw.contains("cannot produce"));
            }
            other => panic!("expected UpstreamContract, got {other:?}"),
        }
    }
}
