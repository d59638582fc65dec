//! On-chain activity collector (Solana-style JSON-RPC).
//!
//! Issues two independent reads against the same ledger endpoint (native
//! balance and owned non-fungible assets) concurrently, and joins them
//! into one signal. Either read failing fails the whole signal.

use serde::Deserialize;
use serde_json::{json, Map};
use tracing::{debug, warn};

use crate::signal::{SourceKind, SourceSignal};

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    result: Option<BalanceResult>,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    #[serde(default)]
    value: u64,
}

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    result: Option<AssetsResult>,
}

#[derive(Debug, Deserialize)]
struct AssetsResult {
    #[serde(default)]
    total: u64,
}

/// Read-only wallet-activity lookup by address.
#[derive(Debug, Clone)]
pub struct LedgerActivitySource {
    client: reqwest::Client,
    rpc_url: String,
}

impl LedgerActivitySource {
    pub fn new(
        client: reqwest::Client,
        rpc_url: impl Into<String>,
        api_key: Option<&str>,
    ) -> Self {
        let base = rpc_url.into().trim_end_matches('/').to_string();
        let rpc_url = match api_key {
            Some(key) => format!("{}/?api-key={}", base, key),
            None => base,
        };
        Self { client, rpc_url }
    }

    /// Fetch balance and asset ownership for one wallet.
    ///
    /// `verified` is a binary heuristic: funded (balance > 0) and active
    /// (owns at least one asset). Magnitude is deliberately ignored.
    pub async fn collect(&self, address: Option<&str>) -> SourceSignal {
        let address = match address {
            Some(a) if !a.trim().is_empty() => a.trim(),
            _ => return SourceSignal::absent(SourceKind::OnChainActivity),
        };

        let (balance, assets) = tokio::join!(self.fetch_balance(address), self.fetch_assets(address));

        match (balance, assets) {
            (Ok(sol_balance), Ok(asset_count)) => {
                let verified = sol_balance > 0.0 && asset_count > 0;
                debug!(address, sol_balance, asset_count, verified, "wallet activity fetched");

                let mut fields = Map::new();
                fields.insert("address".into(), json!(address));
                fields.insert("sol_balance".into(), json!(round4(sol_balance)));
                fields.insert("asset_count".into(), json!(asset_count));
                fields.insert("verified".into(), json!(verified));
                fields.insert(
                    "trust_signal".into(),
                    json!(if verified {
                        "Verified Web3 Human"
                    } else {
                        "Low Web3 Activity"
                    }),
                );
                SourceSignal::present(SourceKind::OnChainActivity, fields)
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(address, error = %err, "ledger lookup failed");
                SourceSignal::failed(SourceKind::OnChainActivity, err.to_string())
            }
        }
    }

    async fn fetch_balance(&self, address: &str) -> anyhow::Result<f64> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "getBalance",
            "params": [address],
        });
        let body: BalanceResponse = self.rpc_call(&payload).await?;
        let lamports = body.result.map(|r| r.value).unwrap_or(0);
        Ok(lamports as f64 / LAMPORTS_PER_SOL)
    }

    async fn fetch_assets(&self, address: &str) -> anyhow::Result<u64> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "2",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": address,
                "page": 1,
                "limit": 10,
                "displayOptions": {"showFungible": false},
            },
        });
        let body: AssetsResponse = self.rpc_call(&payload).await?;
        Ok(body.result.map(|r| r.total).unwrap_or(0))
    }

    async fn rpc_call<T: serde::de::DeserializeOwned>(
        &self,
        payload: &serde_json::Value,
    ) -> anyhow::Result<T> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
