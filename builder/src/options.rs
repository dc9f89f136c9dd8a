use serde::{Deserialize, Serialize};

use remit_types::NetworkId;

/// Per-request build options. All fields are optional; the defaults build an
/// unsigned, unsimulated transaction on the configured network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    /// Target network; falls back to [`crate::BuilderConfig::network`].
    #[serde(alias = "networkTarget")]
    pub network: Option<NetworkId>,

    /// Contract override (`C...`); falls back to the network's configured contract.
    #[serde(alias = "contractIdentifier")]
    pub contract_id: Option<String>,

    /// Pre-execute the transaction, then attach the Soroban resources,
    /// authorization entries and resource fee it reports. An unsimulated
    /// envelope must be prepared the same way before it can be submitted.
    pub simulate: bool,

    /// Sign with the server-held key for the account.
    #[serde(alias = "custodialMode")]
    pub custodial: bool,

    /// Fee in stroops, instead of the ledger's current median.
    pub base_fee: Option<u32>,

    /// Validity window in seconds, instead of the configured one.
    pub timeout_secs: Option<u64>,
}
