//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies which Stellar network a transaction targets.
///
/// The passphrase is hashed into every transaction signature payload, so a
/// transaction built for one network is never valid on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The public production network.
    Mainnet,
    /// The SDF test network.
    Testnet,
    /// The SDF preview network for upcoming protocol features.
    Futurenet,
    /// A local quickstart network.
    Standalone,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        Self::Mainnet,
        Self::Testnet,
        Self::Futurenet,
        Self::Standalone,
    ];

    /// The network passphrase.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Mainnet => "Public Global Stellar Network ; September 2015",
            Self::Testnet => "Test SDF Network ; September 2015",
            Self::Futurenet => "Test SDF Future Network ; October 2022",
            Self::Standalone => "Standalone Network ; February 2017",
        }
    }

    /// Public Soroban RPC endpoint, if one is operated for this network.
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Self::Mainnet => None,
            Self::Testnet => Some("https://soroban-testnet.stellar.org"),
            Self::Futurenet => Some("https://rpc-futurenet.stellar.org"),
            Self::Standalone => Some("http://localhost:8000/soroban/rpc"),
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Futurenet => "futurenet",
            Self::Standalone => "standalone",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "public" | "pubnet" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "futurenet" => Ok(Self::Futurenet),
            "standalone" | "local" => Ok(Self::Standalone),
            other => Err(format!("unknown network: {other}")),
        }
    }
}
