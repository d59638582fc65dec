//! The aggregation-and-decision pipeline.
//!
//! One pipeline instance is built at startup and shared across requests;
//! it holds only immutable configuration and clients. Each request owns
//! its profile and decision; no mutable state crosses requests.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::aggregate::ProfileAggregator;
use crate::config::Config;
use crate::decision::{assemble_decision, Underwriting};
use crate::engine::{ChatClient, OpenAiChatClient, ScoringEngine};
use crate::error::{PipelineError, PipelineResult};
use crate::rubric::classify_asset;
use crate::signal::{ReputationProfile, SignalRequest};
use crate::sources::{DeveloperHistorySource, LedgerActivitySource, QaReputationSource};

/// Reputation aggregation and underwriting decision pipeline.
pub struct UnderwritingPipeline {
    aggregator: ProfileAggregator,
    engine: ScoringEngine,
}

impl UnderwritingPipeline {
    /// Build the pipeline from config, wiring the HTTP scoring-engine
    /// client when a credential is present.
    pub fn new(config: Config) -> PipelineResult<Self> {
        let engine_client: Option<Arc<dyn ChatClient>> = match &config.engine_api_key {
            Some(key) => {
                let http = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.engine_timeout_secs))
                    .build()
                    .map_err(|e| {
                        PipelineError::configuration(format!("engine HTTP client: {e}"))
                    })?;
                Some(Arc::new(OpenAiChatClient::new(
                    http,
                    &config.engine_api_url,
                    &config.engine_model,
                    key,
                )))
            }
            None => None,
        };
        Self::with_chat_client(config, engine_client)
    }

    /// Build the pipeline with an explicit scoring-engine client (or none).
    /// Tests inject mocks here.
    pub fn with_chat_client(
        config: Config,
        engine_client: Option<Arc<dyn ChatClient>>,
    ) -> PipelineResult<Self> {
        let source_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.source_timeout_secs))
            .build()
            .map_err(|e| PipelineError::configuration(format!("source HTTP client: {e}")))?;

        let aggregator = ProfileAggregator::new(
            DeveloperHistorySource::new(source_client.clone(), &config.developer_api_url),
            QaReputationSource::new(source_client.clone(), &config.qa_api_url),
            LedgerActivitySource::new(
                source_client,
                &config.ledger_rpc_url,
                config.ledger_api_key.as_deref(),
            ),
        );

        Ok(Self {
            aggregator,
            engine: ScoringEngine::new(engine_client),
        })
    }

    /// Aggregate the reputation profile for one set of identifiers.
    /// Infallible: missing or failing sources degrade to absent signals.
    pub async fn reputation(&self, request: &SignalRequest) -> ReputationProfile {
        self.aggregator.aggregate(request).await
    }

    /// Run the full underwriting pipeline: validate, aggregate, score,
    /// assemble.
    ///
    /// Input validation and the credential check happen before any
    /// external call; the engine call is the only fatal network
    /// dependency.
    pub async fn underwrite(
        &self,
        request: &SignalRequest,
        collateral_asset: &str,
    ) -> PipelineResult<Underwriting> {
        let asset = collateral_asset.trim();
        if asset.is_empty() {
            return Err(PipelineError::validation("collateral_asset is required"));
        }
        let block = classify_asset(asset).ok_or_else(|| {
            PipelineError::validation(format!("unrecognized collateral asset: {asset}"))
        })?;

        if !self.engine.is_configured() {
            return Err(PipelineError::configuration(
                "scoring engine credential is not configured",
            ));
        }

        let profile = self.aggregator.aggregate(request).await;
        let verdict = match self.engine.score(&profile, asset).await {
            Ok(v) => v,
            Err(err) => {
                warn!(error = %err, "scoring engine call failed");
                return Err(err);
            }
        };

        let decision = assemble_decision(&verdict, block);
        info!(
            asset,
            block = block.as_str(),
            score = decision.score,
            tier = ?decision.tier,
            "underwriting decision assembled"
        );

        Ok(Underwriting { profile, decision })
    }
}
