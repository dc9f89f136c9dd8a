use serde::{Deserialize, Serialize};

use remit_transactions::{Envelope, XdrError};

/// Cost estimate from a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Resource fee in stroops, already included in the envelope's fee.
    pub cost: String,
    /// Per-invocation results as returned by the ledger.
    pub results: Vec<serde_json::Value>,
}

/// What a build hands back to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    /// Base64 XDR envelope, unsigned unless built in custodial mode.
    /// Carries Soroban resources and authorization only when simulated.
    pub serialized_transaction: String,

    /// Present only when simulation was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationSummary>,
}

impl TransactionResult {
    /// Decode the serialized envelope.
    pub fn envelope(&self) -> Result<Envelope, XdrError> {
        Envelope::from_base64(&self.serialized_transaction)
    }
}
