//! Source collectors for external identity and wallet evidence.
//!
//! Each collector wraps one read-only external API, normalizes its reply
//! into a [`SourceSignal`](crate::signal::SourceSignal), and contains its
//! own failure: a missing identifier short-circuits to an absent signal
//! without touching the network, and a transport error or bad reply is
//! recorded on the signal instead of being raised. Collector calls are
//! bounded by the shared client timeout so one slow source cannot stall the
//! request.

mod developer;
mod ledger;
mod qa;

pub use developer::DeveloperHistorySource;
pub use ledger::LedgerActivitySource;
pub use qa::QaReputationSource;
