//! Final decision assembly.
//!
//! The engine supplies the score and its narrative; the published terms are
//! recomputed here from the deterministic rubric so they are always
//! internally consistent even when the engine's arithmetic drifts.

use serde::{Deserialize, Serialize};

use crate::engine::EngineVerdict;
use crate::rubric::{
    clamp_score, liquidation_threshold_pct, pricing_schedule, required_collateral_pct,
    tier_for_score, TenorPrice, TrustTier, VolatilityBlock,
};
use crate::signal::ReputationProfile;

/// Loan terms for one underwriting request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustDecision {
    /// Engine-judged score, clamped to the published range.
    pub score: i64,
    /// Engine-judged narrative for the score.
    pub scoring_reasoning: String,
    pub block: VolatilityBlock,
    pub tier: TrustTier,
    pub required_collateral_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidation_threshold_pct: Option<f64>,
    pub pricing: [TenorPrice; 4],
}

/// Profile + decision pair returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Underwriting {
    pub profile: ReputationProfile,
    pub decision: TrustDecision,
}

/// Build the final decision from the engine's verdict and the locally
/// validated volatility block.
///
/// Score and reasoning are accepted from the verdict; block, tier,
/// collateral, liquidation threshold, and pricing are recomputed from the
/// rubric tables, overriding whatever the engine reported for them.
pub fn assemble_decision(verdict: &EngineVerdict, block: VolatilityBlock) -> TrustDecision {
    let score = clamp_score(verdict.calculated_trust_score);
    let tier = tier_for_score(score);

    TrustDecision {
        score,
        scoring_reasoning: verdict.scoring_reasoning.clone(),
        block,
        tier,
        required_collateral_pct: required_collateral_pct(tier, block),
        liquidation_threshold_pct: liquidation_threshold_pct(block),
        pricing: pricing_schedule(tier),
    }
}
