//! JSON-RPC client for a Soroban RPC server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use remit_transactions::xdr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, Limits, PublicKey, ReadXdr, Uint256,
    WriteXdr,
};
use remit_types::StellarAddress;
use serde::Deserialize;

use crate::error::ClientError;
use crate::ledger::{FeeStats, LedgerClient, SimulationResponse};

/// HTTP client for a Soroban RPC endpoint.
///
/// Wraps `reqwest::Client` with the endpoint URL and provides typed
/// methods for each RPC method the builder needs.
#[derive(Debug)]
pub struct SorobanRpcClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl SorobanRpcClient {
    /// Create a client for the given endpoint (e.g. `https://soroban-testnet.stellar.org`).
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(rpc_url, Duration::from_secs(30))
    }

    pub fn with_timeout(
        rpc_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The configured endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC 2.0 request and return the `result` field.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, url = %self.rpc_url, "soroban rpc request");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{method}: {e}")))?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(format!(
                "{method}: server returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("{method}: {e}")))?;

        parse_rpc_envelope(method, json)
    }
}

fn parse_rpc_envelope(
    method: &str,
    mut json: serde_json::Value,
) -> Result<serde_json::Value, ClientError> {
    if let Some(err) = json.get("error") {
        return Err(ClientError::Rpc {
            code: err.get("code").and_then(|c| c.as_i64()).unwrap_or(0),
            message: err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string(),
        });
    }
    json.get_mut("result")
        .map(serde_json::Value::take)
        .ok_or_else(|| ClientError::InvalidResponse(format!("{method}: missing result")))
}

/// Base64 XDR of the `LedgerKey` for an account.
fn account_ledger_key(account: &StellarAddress) -> Result<String, ClientError> {
    let key = remit_crypto::decode_account(account.as_str())
        .map_err(|e| ClientError::InvalidResponse(format!("cannot key account {account}: {e}")))?;
    LedgerKey::Account(LedgerKeyAccount {
        account_id: AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(key.0))),
    })
    .to_xdr_base64(Limits::none())
    .map_err(|e| ClientError::InvalidResponse(format!("cannot key account {account}: {e}")))
}

/// Read `seqNum` from base64 `LedgerEntryData` holding an `AccountEntry`.
fn sequence_from_account_entry(entry_xdr: &str) -> Result<i64, ClientError> {
    let entry = LedgerEntryData::from_xdr_base64(entry_xdr, Limits::none())
        .map_err(|e| ClientError::InvalidResponse(format!("account entry: {e}")))?;
    match entry {
        LedgerEntryData::Account(account) => Ok(account.seq_num.0),
        other => Err(ClientError::InvalidResponse(format!(
            "expected an account entry, got {}",
            other.name()
        ))),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntriesResult {
    #[serde(default)]
    entries: Option<Vec<LedgerEntryResult>>,
}

#[derive(Deserialize)]
struct LedgerEntryResult {
    xdr: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeeStatsResult {
    soroban_inclusion_fee: FeeDistribution,
    #[serde(default)]
    latest_ledger: u32,
}

/// Percentiles arrive as decimal strings.
#[derive(Deserialize)]
struct FeeDistribution {
    min: String,
    mode: String,
    p50: String,
    p90: String,
    max: String,
}

fn parse_fee(field: &str, value: &str) -> Result<u32, ClientError> {
    value
        .parse::<u32>()
        .map_err(|e| ClientError::InvalidResponse(format!("fee stat {field}={value:?}: {e}")))
}

fn fee_stats_from_result(result: serde_json::Value) -> Result<FeeStats, ClientError> {
    let stats: FeeStatsResult = serde_json::from_value(result)
        .map_err(|e| ClientError::InvalidResponse(format!("getFeeStats: {e}")))?;
    let fees = stats.soroban_inclusion_fee;
    Ok(FeeStats {
        min: parse_fee("min", &fees.min)?,
        mode: parse_fee("mode", &fees.mode)?,
        p50: parse_fee("p50", &fees.p50)?,
        p90: parse_fee("p90", &fees.p90)?,
        max: parse_fee("max", &fees.max)?,
        latest_ledger: stats.latest_ledger,
    })
}

#[async_trait]
impl LedgerClient for SorobanRpcClient {
    async fn account_sequence(&self, account: &StellarAddress) -> Result<i64, ClientError> {
        let key = account_ledger_key(account)?;
        let result = self
            .rpc_call("getLedgerEntries", serde_json::json!({ "keys": [key] }))
            .await?;

        let entries: LedgerEntriesResult = serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("getLedgerEntries: {e}")))?;
        let entry = entries
            .entries
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::AccountNotFound(account.to_string()))?;

        sequence_from_account_entry(&entry.xdr)
    }

    async fn fee_stats(&self) -> Result<FeeStats, ClientError> {
        let result = self.rpc_call("getFeeStats", serde_json::json!({})).await?;
        fee_stats_from_result(result)
    }

    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulationResponse, ClientError> {
        let result = self
            .rpc_call(
                "simulateTransaction",
                serde_json::json!({ "transaction": envelope_xdr }),
            )
            .await?;

        serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("simulateTransaction: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    /// A bare `AccountEntry`: no inflation destination, home domain,
    /// signers or extensions.
    fn account_entry_xdr(seq: i64) -> String {
        let key = remit_crypto::decode_account(ACCOUNT).unwrap();
        let mut bytes = Vec::new();
        // LedgerEntryType ACCOUNT, PublicKeyType ED25519
        bytes.extend_from_slice(&0i32.to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());
        bytes.extend_from_slice(&key.0);
        // balance, seqNum, numSubEntries, inflationDest (absent), flags
        bytes.extend_from_slice(&10_000_000_000i64.to_be_bytes());
        bytes.extend_from_slice(&seq.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        // homeDomain "", thresholds, signers<>, ext v0
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&[1, 0, 0, 0]);
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0i32.to_be_bytes());
        LedgerEntryData::from_xdr(&bytes, Limits::none())
            .unwrap()
            .to_xdr_base64(Limits::none())
            .unwrap()
    }

    #[test]
    fn ledger_key_layout() {
        let key = account_ledger_key(&StellarAddress::new(ACCOUNT)).unwrap();
        let decoded = LedgerKey::from_xdr_base64(&key, Limits::none()).unwrap();
        let account = remit_crypto::decode_account(ACCOUNT).unwrap();
        assert_eq!(
            decoded,
            LedgerKey::Account(LedgerKeyAccount {
                account_id: AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(account.0))),
            })
        );
        assert_eq!(decoded.to_xdr(Limits::none()).unwrap().len(), 40);
    }

    #[test]
    fn ledger_key_rejects_bad_account() {
        assert!(account_ledger_key(&StellarAddress::new("GABC")).is_err());
    }

    #[test]
    fn sequence_read_from_entry() {
        let xdr = account_entry_xdr(123_456_789_012);
        assert_eq!(sequence_from_account_entry(&xdr).unwrap(), 123_456_789_012);
    }

    #[test]
    fn truncated_entry_is_invalid_response() {
        let xdr = account_entry_xdr(5);
        assert!(matches!(
            sequence_from_account_entry(&xdr[..24]),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn fee_stats_parsed_from_strings() {
        let result = serde_json::json!({
            "sorobanInclusionFee": {
                "max": "210", "min": "100", "mode": "100",
                "p10": "100", "p50": "120", "p90": "200", "p99": "210",
                "transactionCount": "10", "ledgerCount": 50
            },
            "inclusionFee": { "max": "100", "min": "100", "mode": "100", "p50": "100" },
            "latestLedger": 4519945
        });
        let stats = fee_stats_from_result(result).unwrap();
        assert_eq!(stats.p50, 120);
        assert_eq!(stats.max, 210);
        assert_eq!(stats.latest_ledger, 4519945);
    }

    #[test]
    fn fee_stats_rejects_non_numeric() {
        let result = serde_json::json!({
            "sorobanInclusionFee": {
                "max": "x", "min": "100", "mode": "100", "p50": "100", "p90": "100"
            }
        });
        assert!(matches!(
            fee_stats_from_result(result),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn rpc_error_envelope_surfaces_code() {
        let json = serde_json::json!({
            "jsonrpc": "2.0", "id": 1,
            "error": { "code": -32602, "message": "invalid params" }
        });
        assert_eq!(
            parse_rpc_envelope("getFeeStats", json).unwrap_err(),
            ClientError::Rpc {
                code: -32602,
                message: "invalid params".into()
            }
        );
    }

    #[test]
    fn rpc_missing_result_is_invalid() {
        let json = serde_json::json!({ "jsonrpc": "2.0", "id": 1 });
        assert!(matches!(
            parse_rpc_envelope("getFeeStats", json),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let client =
            SorobanRpcClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.fee_stats().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_transient());
    }
}
