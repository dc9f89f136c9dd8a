//! Stellar account and contract address types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of every ed25519 strkey (`G...`, `S...`, `C...`).
pub const STRKEY_LEN: usize = 56;

fn is_strkey_shaped(s: &str, prefix: char) -> bool {
    s.len() == STRKEY_LEN
        && s.starts_with(prefix)
        && s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}

/// A Stellar account address, the `G...` strkey of an ed25519 public key.
///
/// Construction does not verify the checksum. Use
/// `remit_crypto::decode_account` when the key bytes are needed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StellarAddress(String);

impl StellarAddress {
    /// The first character of every account strkey.
    pub const PREFIX: char = 'G';

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cheap shape check: prefix, length and base32 alphabet.
    pub fn is_well_formed(&self) -> bool {
        is_strkey_shaped(&self.0, Self::PREFIX)
    }
}

impl fmt::Display for StellarAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StellarAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StellarAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A deployed Soroban contract address, the `C...` strkey of the contract hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractAddress(String);

impl ContractAddress {
    /// The first character of every contract strkey.
    pub const PREFIX: char = 'C';

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        is_strkey_shaped(&self.0, Self::PREFIX)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
