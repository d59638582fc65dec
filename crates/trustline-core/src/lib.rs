//! Reputation aggregation and underwriting decision pipeline.
//!
//! Collects identity and behavioral signals from independent, unreliable
//! external sources (developer history, Q&A reputation, on-chain wallet
//! activity), merges them into a normalized profile, submits the profile to
//! an external scoring engine under a strict output contract, and derives a
//! deterministic loan-term decision: trust tier, collateral ratio,
//! liquidation threshold, and a multi-tenor pricing schedule.
//!
//! The scoring engine is an oracle for the score and its narrative only;
//! the [`rubric`] module is the source of truth for every term derived
//! from that score.

pub mod aggregate;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod rubric;
pub mod signal;
pub mod sources;

pub use config::Config;
pub use decision::{TrustDecision, Underwriting};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::UnderwritingPipeline;
pub use rubric::{TenorPrice, TrustTier, VolatilityBlock};
pub use signal::{ReputationProfile, SignalRequest, SourceKind, SourceSignal};
