//! Deterministic underwriting rubric.
//!
//! The scoring engine supplies judgment (the score and its narrative); this
//! module is the source of truth for everything derivable from that score:
//! asset classification, trust tier, collateral requirement, liquidation
//! threshold, and the tenor pricing schedule. The assembler recomputes all
//! of these from the tables here, overriding the engine's arithmetic.

use serde::{Deserialize, Serialize};

/// Floor of the trust-score range.
pub const SCORE_MIN: i64 = 300;
/// Cap of the trust-score range.
pub const SCORE_MAX: i64 = 850;
/// Starting score before adjustments.
pub const SCORE_BASE: i64 = 500;

/// Liquidation threshold published for high-volatility collateral. Policy
/// constant, not derived from score.
pub const HIGH_VOLATILITY_LIQUIDATION_PCT: f64 = 115.0;

/// Base commission rates per tenor, in months and percent.
pub const BASE_TENOR_RATES: [(u32, f64); 4] = [(1, 1.0), (3, 2.8), (6, 5.2), (12, 9.8)];

/// Volatility class of a collateral asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityBlock {
    Low,
    Medium,
    High,
}

impl VolatilityBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Discrete risk class derived from the trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustTier {
    Tier1,
    Tier2,
    Tier3,
}

impl TrustTier {
    /// Commission multiplier applied to the base tenor rates.
    pub fn pricing_multiplier(&self) -> f64 {
        match self {
            Self::Tier1 => 1.0,
            Self::Tier2 => 1.25,
            Self::Tier3 => 1.75,
        }
    }
}

/// One tenor of the published pricing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenorPrice {
    pub months: u32,
    pub commission_pct: f64,
}

/// Clamp a raw engine-computed score into the published range.
pub fn clamp_score(raw: f64) -> i64 {
    (raw.round() as i64).clamp(SCORE_MIN, SCORE_MAX)
}

/// Map a collateral asset identifier to its volatility block.
///
/// The table is fixed and case-insensitive. Unrecognized identifiers return
/// `None`; the caller rejects them as a validation error rather than
/// defaulting silently.
pub fn classify_asset(asset: &str) -> Option<VolatilityBlock> {
    let symbol = asset.trim().to_ascii_uppercase();
    let block = match symbol.as_str() {
        // Broad index funds, high-grade bonds, large-cap blue chips.
        "SPY" | "VOO" | "VTI" | "IVV" | "AGG" | "BND" | "TLT" | "AAPL" | "MSFT" | "JNJ" | "PG"
        | "KO" => VolatilityBlock::Low,
        // Growth equities, sector funds, mid-caps.
        "QQQ" | "XLK" | "SMH" | "ARKK" | "NVDA" | "TSLA" | "AMD" | "SHOP" | "PLTR" | "SQ" => {
            VolatilityBlock::Medium
        }
        // Crypto majors, emerging equities, small caps.
        "BTC" | "ETH" | "SOL" | "BNB" | "ADA" | "AVAX" | "DOGE" | "MATIC" | "IONQ" | "RKLB" => {
            VolatilityBlock::High
        }
        _ => return None,
    };
    Some(block)
}

/// Tier keyed by score: >=750 Tier1, 600..=749 Tier2, below Tier3.
pub fn tier_for_score(score: i64) -> TrustTier {
    if score >= 750 {
        TrustTier::Tier1
    } else if score >= 600 {
        TrustTier::Tier2
    } else {
        TrustTier::Tier3
    }
}

/// Required collateral percentage, table-exact per tier and block.
pub fn required_collateral_pct(tier: TrustTier, block: VolatilityBlock) -> f64 {
    match (tier, block) {
        (TrustTier::Tier1, VolatilityBlock::Low) => 115.0,
        (TrustTier::Tier1, VolatilityBlock::Medium) => 135.0,
        (TrustTier::Tier1, VolatilityBlock::High) => 160.0,
        (TrustTier::Tier2, VolatilityBlock::Low) => 130.0,
        (TrustTier::Tier2, VolatilityBlock::Medium) => 155.0,
        (TrustTier::Tier2, VolatilityBlock::High) => 190.0,
        (TrustTier::Tier3, VolatilityBlock::Low) => 150.0,
        (TrustTier::Tier3, VolatilityBlock::Medium) => 175.0,
        (TrustTier::Tier3, VolatilityBlock::High) => 220.0,
    }
}

/// Liquidation threshold: fixed for high-volatility collateral, absent
/// otherwise.
pub fn liquidation_threshold_pct(block: VolatilityBlock) -> Option<f64> {
    match block {
        VolatilityBlock::High => Some(HIGH_VOLATILITY_LIQUIDATION_PCT),
        VolatilityBlock::Low | VolatilityBlock::Medium => None,
    }
}

/// Published four-tenor pricing schedule for a tier, rounded to two
/// decimals.
pub fn pricing_schedule(tier: TrustTier) -> [TenorPrice; 4] {
    let mult = tier.pricing_multiplier();
    BASE_TENOR_RATES.map(|(months, base)| TenorPrice {
        months,
        commission_pct: round2(base * mult),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(tier_for_score(850), TrustTier::Tier1);
        assert_eq!(tier_for_score(750), TrustTier::Tier1);
        assert_eq!(tier_for_score(749), TrustTier::Tier2);
        assert_eq!(tier_for_score(600), TrustTier::Tier2);
        assert_eq!(tier_for_score(599), TrustTier::Tier3);
        assert_eq!(tier_for_score(300), TrustTier::Tier3);
    }

    #[test]
    fn clamp_holds_at_both_ends() {
        assert_eq!(clamp_score(1200.0), 850);
        assert_eq!(clamp_score(850.0), 850);
        assert_eq!(clamp_score(612.4), 612);
        assert_eq!(clamp_score(300.0), 300);
        assert_eq!(clamp_score(-50.0), 300);
    }

    #[test]
    fn collateral_table_is_exact() {
        let table = [
            (TrustTier::Tier1, VolatilityBlock::Low, 115.0),
            (TrustTier::Tier1, VolatilityBlock::Medium, 135.0),
            (TrustTier::Tier1, VolatilityBlock::High, 160.0),
            (TrustTier::Tier2, VolatilityBlock::Low, 130.0),
            (TrustTier::Tier2, VolatilityBlock::Medium, 155.0),
            (TrustTier::Tier2, VolatilityBlock::High, 190.0),
            (TrustTier::Tier3, VolatilityBlock::Low, 150.0),
            (TrustTier::Tier3, VolatilityBlock::Medium, 175.0),
            (TrustTier::Tier3, VolatilityBlock::High, 220.0),
        ];
        for (tier, block, expected) in table {
            assert_eq!(required_collateral_pct(tier, block), expected);
        }
    }

    #[test]
    fn liquidation_threshold_present_iff_high() {
        assert_eq!(liquidation_threshold_pct(VolatilityBlock::High), Some(115.0));
        assert_eq!(liquidation_threshold_pct(VolatilityBlock::Medium), None);
        assert_eq!(liquidation_threshold_pct(VolatilityBlock::Low), None);
    }

    #[test]
    fn pricing_is_base_rate_times_tier_multiplier() {
        let tier1 = pricing_schedule(TrustTier::Tier1);
        assert_eq!(tier1[0].months, 1);
        assert_eq!(tier1[0].commission_pct, 1.0);
        assert_eq!(tier1[3].commission_pct, 9.8);

        // Tier2, 3-month: 2.8 * 1.25 = 3.5
        let tier2 = pricing_schedule(TrustTier::Tier2);
        assert_eq!(tier2[1].months, 3);
        assert_eq!(tier2[1].commission_pct, 3.5);

        let tier3 = pricing_schedule(TrustTier::Tier3);
        assert_eq!(tier3[0].commission_pct, 1.75);
        assert_eq!(tier3[1].commission_pct, 4.9);
        assert_eq!(tier3[2].commission_pct, 9.1);
        assert_eq!(tier3[3].commission_pct, 17.15);
    }

    #[test]
    fn pricing_tenors_are_ordered() {
        for tier in [TrustTier::Tier1, TrustTier::Tier2, TrustTier::Tier3] {
            let months: Vec<u32> = pricing_schedule(tier).iter().map(|t| t.months).collect();
            assert_eq!(months, vec![1, 3, 6, 12]);
        }
    }

    #[test]
    fn every_known_asset_maps_to_exactly_one_block() {
        assert_eq!(classify_asset("SPY"), Some(VolatilityBlock::Low));
        assert_eq!(classify_asset("QQQ"), Some(VolatilityBlock::Medium));
        assert_eq!(classify_asset("BTC"), Some(VolatilityBlock::High));
        assert_eq!(classify_asset("sol"), Some(VolatilityBlock::High));
        assert_eq!(classify_asset("  eth "), Some(VolatilityBlock::High));
    }

    #[test]
    fn unknown_assets_do_not_default() {
        assert_eq!(classify_asset("FLOOP"), None);
        assert_eq!(classify_asset(""), None);
    }
}
