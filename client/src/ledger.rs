//! The ledger capabilities a transaction build needs.

use async_trait::async_trait;
use remit_types::StellarAddress;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Read-only access to ledger state plus pre-execution.
///
/// Implementations must be safe to share across concurrent builds. Two
/// builds for the same account may observe the same sequence number; the
/// ledger rejects whichever is submitted second.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The account's current sequence number. The next transaction uses this + 1.
    async fn account_sequence(&self, account: &StellarAddress) -> Result<i64, ClientError>;

    /// Recent inclusion fee statistics for contract invocations.
    async fn fee_stats(&self) -> Result<FeeStats, ClientError>;

    /// Pre-execute a base64 XDR envelope without committing it.
    ///
    /// A simulation that runs but fails is `Ok` with
    /// [`SimulationResponse::error`] set; `Err` means the request itself failed.
    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulationResponse, ClientError>;
}

/// Inclusion fee percentiles in stroops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStats {
    pub min: u32,
    pub mode: u32,
    pub p50: u32,
    pub p90: u32,
    pub max: u32,
    pub latest_ledger: u32,
}

impl FeeStats {
    /// Stats for a quiet network where everything pays `fee`.
    pub fn flat(fee: u32) -> Self {
        Self {
            min: fee,
            mode: fee,
            p50: fee,
            p90: fee,
            max: fee,
            latest_ledger: 0,
        }
    }
}

/// Result of a `simulateTransaction` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Minimum resource fee in stroops, as a decimal string.
    #[serde(default)]
    pub min_resource_fee: Option<String>,
    /// Per-invocation results, passed through untouched.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    /// Base64 `SorobanTransactionData` to attach before signing.
    #[serde(default)]
    pub transaction_data: Option<String>,
    /// Set when the invocation failed during simulation.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub latest_ledger: u32,
}

impl SimulationResponse {
    /// `minResourceFee` in stroops.
    pub fn resource_fee(&self) -> Result<u32, ClientError> {
        let fee = self.min_resource_fee.as_deref().ok_or_else(|| {
            ClientError::InvalidResponse("simulation reported no minResourceFee".into())
        })?;
        fee.parse().map_err(|e| {
            ClientError::InvalidResponse(format!("minResourceFee {fee:?}: {e}"))
        })
    }

    /// Base64 `SorobanAuthorizationEntry` values the first result asks for.
    pub fn auth_entries(&self) -> Result<Vec<&str>, ClientError> {
        let auth = match self.results.first().and_then(|r| r.get("auth")) {
            None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
            Some(auth) => auth,
        };
        auth.as_array()
            .ok_or_else(|| ClientError::InvalidResponse("simulation auth is not a list".into()))?
            .iter()
            .map(|entry| {
                entry.as_str().ok_or_else(|| {
                    ClientError::InvalidResponse("simulation auth entry is not a string".into())
                })
            })
            .collect()
    }
}
