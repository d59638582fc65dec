//! Fixed scoring-rubric instruction and request payload construction.

use serde_json::json;

use crate::signal::ReputationProfile;

/// Version tag of the rubric instruction below. Bump when the directive
/// text changes so cached or recorded replies can be told apart.
pub const RUBRIC_VERSION: &str = "v1";

/// The underwriting directive sent as the system message on every scoring
/// call. The score adjustments for wallet age/volume and developer activity
/// are deliberately prose ("up to", "active"); those components are
/// engine-judged; only the constants below are recomputed locally.
pub const SYSTEM_PROMPT: &str = r#"CRITICAL COMPLIANCE & UNDERWRITING DIRECTIVE:
You are the Chief Risk Officer for an asset-backed B2B lending platform.
You will receive the applicant's raw on-chain wallet data and Web2 identity data (developer history, Q&A reputation, social attestation), plus their requested collateral asset.

STEP 1: CALCULATE THE TRUST SCORE (Range: 300 - 850)
Start at a base score of 500 and apply these exact adjustments from the raw input data:
- On-Chain Liquidation Penalty: if the wallet has ANY history of forced DeFi liquidations, subtract 200 points.
- On-Chain Age & Volume: add up to 100 points for wallets older than 1 year with sustained transaction volume.
- Verified Social Identity: add 100 points for a verified social profile with substantial reputation or connections (e.g. verified LinkedIn with >100 connections, or Q&A reputation >500).
- Developer Proof: add 100 points for a developer account older than 2 years with active contributions in the last 6 months.
- Empty Profile Penalty: if the Web2 data is missing or empty, subtract 100 points (high sybil/bot risk).
Sum these to find the final trust score (cap at 850, floor at 300).

STEP 2: CLASSIFY THE ASSET VOLATILITY
Categorize the collateral:
- BLOCK I (Low Volatility): global index funds, sovereign AAA bonds, large-cap blue chips.
- BLOCK II (Medium Volatility): growth equities, sector funds, mid-caps.
- BLOCK III (High Volatility): crypto majors (BTC/ETH/SOL), emerging equities, small caps.

STEP 3: CALCULATE TERMS FROM THE TRUST SCORE
- Score >= 750 (Tier 1): Block I: 115%, Block II: 135%, Block III: 160%.
- Score 600-749 (Tier 2): Block I: 130%, Block II: 155%, Block III: 190%.
- Score < 600 (Tier 3): Block I: 150%, Block II: 175%, Block III: 220%.

STEP 4: GENERATE THE PRICING ARRAY
Base commission rates: 1 MO = 1.0%, 3 MO = 2.8%, 6 MO = 5.2%, 12 MO = 9.8%.
Multiply each base rate by 1.0 for Tier 1, 1.25 for Tier 2, and 1.75 for Tier 3.

CRITICAL INSTRUCTION:
Return ONLY a raw JSON object. No markdown blocks, no conversational text, no explanations.

You MUST use this exact JSON schema:
{
  "calculated_trust_score": "Number (300-850)",
  "scoring_reasoning": "String (briefly explain the points added/subtracted in Step 1)",
  "asset_classification": {
    "block": "String",
    "volatility_description": "String"
  },
  "underwriting_decision": {
    "trust_tier": "String",
    "required_collateral_percentage": "Number",
    "liquidation_threshold_percentage": "Number (output 115 if Block III, else null)"
  },
  "pricing_array_percentages": {
    "1_month": "Number",
    "3_month": "Number",
    "6_month": "Number",
    "12_month": "Number"
  }
}"#;

/// Serialize the profile + requested asset into the user message,
/// timestamped at request time.
pub fn build_user_payload(profile: &ReputationProfile, collateral_asset: &str) -> String {
    json!({
        "collateral_asset": collateral_asset,
        "web2_web3_profile": profile,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
    .to_string()
}
