//! Builder configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use remit_types::NetworkId;
use remit_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("cannot serialize config: {0}")]
    Serialize(String),
}

/// Per-network overrides. Anything left unset falls back to the network's
/// well-known value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network passphrase; transaction hashes commit to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,

    /// Soroban RPC endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Default deployed split contract (`C...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
}

/// One [`NetworkConfig`] per known network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTable {
    #[serde(default)]
    pub mainnet: NetworkConfig,
    #[serde(default)]
    pub testnet: NetworkConfig,
    #[serde(default)]
    pub futurenet: NetworkConfig,
    #[serde(default)]
    pub standalone: NetworkConfig,
}

impl NetworkTable {
    pub fn get(&self, network: NetworkId) -> &NetworkConfig {
        match network {
            NetworkId::Mainnet => &self.mainnet,
            NetworkId::Testnet => &self.testnet,
            NetworkId::Futurenet => &self.futurenet,
            NetworkId::Standalone => &self.standalone,
        }
    }

    pub fn get_mut(&mut self, network: NetworkId) -> &mut NetworkConfig {
        match network {
            NetworkId::Mainnet => &mut self.mainnet,
            NetworkId::Testnet => &mut self.testnet,
            NetworkId::Futurenet => &mut self.futurenet,
            NetworkId::Standalone => &mut self.standalone,
        }
    }
}

/// Configuration for a [`crate::SplitTxBuilder`].
///
/// Can be loaded from a TOML file via [`BuilderConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Signing secrets never live here;
/// only the name of the environment variable that holds one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Network used when a request does not name one.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Environment variable holding the custodial `S...` secret.
    #[serde(default = "default_custodial_secret_env")]
    pub custodial_secret_env: String,

    /// Validity window of a built transaction, in seconds from build time.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub networks: NetworkTable,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Testnet
}

fn default_custodial_secret_env() -> String {
    "REMIT_SIGNING_SECRET".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BuilderConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// The passphrase transactions on `network` are hashed under.
    pub fn passphrase(&self, network: NetworkId) -> &str {
        self.networks
            .get(network)
            .passphrase
            .as_deref()
            .unwrap_or_else(|| network.passphrase())
    }

    pub fn rpc_url(&self, network: NetworkId) -> Option<&str> {
        self.networks
            .get(network)
            .rpc_url
            .as_deref()
            .or_else(|| network.default_rpc_url())
    }

    /// Default split contract on `network`, if one is deployed there.
    pub fn contract_id(&self, network: NetworkId) -> Option<&str> {
        self.networks.get(network).contract_id.as_deref()
    }

    /// Builder: set the default contract for `network`.
    pub fn with_contract(mut self, network: NetworkId, contract_id: impl Into<String>) -> Self {
        self.networks.get_mut(network).contract_id = Some(contract_id.into());
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            custodial_secret_env: default_custodial_secret_env(),
            timeout_secs: default_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            networks: NetworkTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONTRACT: &str = "CA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQGAXE";

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = BuilderConfig::default().with_contract(NetworkId::Testnet, CONTRACT);
        let toml_str = config.to_toml_string().unwrap();
        let parsed = BuilderConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = BuilderConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network, NetworkId::Testnet);
        assert_eq!(config.custodial_secret_env, "REMIT_SIGNING_SECRET");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.contract_id(NetworkId::Testnet).is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "futurenet"
            timeout_secs = 120

            [networks.futurenet]
            contract_id = "CA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQGAXE"
            rpc_url = "http://rpc.internal:8000"
        "#;
        let config = BuilderConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, NetworkId::Futurenet);
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.contract_id(NetworkId::Futurenet), Some(CONTRACT));
        assert_eq!(config.rpc_url(NetworkId::Futurenet), Some("http://rpc.internal:8000"));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn passphrase_falls_back_to_well_known() {
        let mut config = BuilderConfig::default();
        assert_eq!(
            config.passphrase(NetworkId::Mainnet),
            "Public Global Stellar Network ; September 2015"
        );
        config.networks.standalone.passphrase = Some("Private Net".into());
        assert_eq!(config.passphrase(NetworkId::Standalone), "Private Net");
    }

    #[test]
    fn mainnet_has_no_default_rpc() {
        assert!(BuilderConfig::default().rpc_url(NetworkId::Mainnet).is_none());
        assert!(BuilderConfig::default().rpc_url(NetworkId::Testnet).is_some());
    }

    #[test]
    fn unknown_network_rejected() {
        assert!(matches!(
            BuilderConfig::from_toml_str("network = \"moonnet\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_format = \"json\"").unwrap();
        let config = BuilderConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            BuilderConfig::from_toml_file("/nonexistent/remit.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
