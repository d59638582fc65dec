//! Profile aggregation: fan out the collectors, join, merge.

use tracing::debug;

use crate::signal::{ReputationProfile, SignalRequest, SocialAttestation};
use crate::sources::{DeveloperHistorySource, LedgerActivitySource, QaReputationSource};

/// Runs the configured collectors concurrently and merges their signals
/// into one profile.
///
/// Aggregation never fails: collectors isolate their own errors, so the
/// worst case is a profile with zero present signals, which is still valid
/// scoring input. All collectors settle before the profile exists; no
/// partial result leaks to later stages.
pub struct ProfileAggregator {
    developer: DeveloperHistorySource,
    qa: QaReputationSource,
    ledger: LedgerActivitySource,
}

impl ProfileAggregator {
    pub fn new(
        developer: DeveloperHistorySource,
        qa: QaReputationSource,
        ledger: LedgerActivitySource,
    ) -> Self {
        Self {
            developer,
            qa,
            ledger,
        }
    }

    pub async fn aggregate(&self, request: &SignalRequest) -> ReputationProfile {
        let (developer_history, qa_reputation, on_chain_activity) = tokio::join!(
            self.developer.collect(request.developer_id.as_deref()),
            self.qa.collect(request.qa_id),
            self.ledger.collect(request.wallet_address.as_deref()),
        );

        let profile = ReputationProfile {
            developer_history,
            qa_reputation,
            on_chain_activity,
            // Declared claim, attached unconditionally; no social-graph
            // source is wired in.
            social_attestation: SocialAttestation::default(),
        };
        debug!(present = profile.present_signals(), "profile aggregated");
        profile
    }
}
