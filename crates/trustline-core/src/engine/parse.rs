//! Strict validation of the scoring engine's reply.
//!
//! The reply is free-form text expected to contain exactly one JSON object.
//! Decoding starts at the first `{` and consumes one balanced value; prose
//! before or after is ignored. Anything short of the full schema is an
//! upstream contract violation carrying the raw text for diagnosis.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// The engine's verdict, as returned over the wire. Scoring fields are
/// authoritative; term fields are validated for presence but recomputed by
/// the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineVerdict {
    pub calculated_trust_score: f64,
    pub scoring_reasoning: String,
    pub asset_classification: AssetClassification,
    pub underwriting_decision: EngineTerms,
    pub pricing_array_percentages: EnginePricing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClassification {
    pub block: String,
    #[serde(default)]
    pub volatility_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTerms {
    pub trust_tier: String,
    pub required_collateral_percentage: f64,
    #[serde(default)]
    pub liquidation_threshold_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePricing {
    #[serde(rename = "1_month")]
    pub one_month: f64,
    #[serde(rename = "3_month")]
    pub three_month: f64,
    #[serde(rename = "6_month")]
    pub six_month: f64,
    #[serde(rename = "12_month")]
    pub twelve_month: f64,
}

/// Locate and validate the single JSON object in a possibly noisy reply.
pub fn extract_verdict(reply: &str) -> PipelineResult<EngineVerdict> {
    let text = reply.trim();
    let start = text.find('{').ok_or_else(|| {
        PipelineError::upstream_contract("no JSON object found in engine reply", text)
    })?;

    let value: serde_json::Value = serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<serde_json::Value>()
        .next()
        .ok_or_else(|| {
            PipelineError::upstream_contract("no JSON object found in engine reply", text)
        })?
        .map_err(|e| {
            PipelineError::upstream_contract(format!("invalid JSON in engine reply: {e}"), text)
        })?;

    serde_json::from_value(value).map_err(|e| {
        PipelineError::upstream_contract(format!("engine reply missing required field: {e}"), text)
    })
}
