//! Strkey addresses on top of `stellar-strkey`.
//!
//! Only the three flavours a split build touches are exposed: `G...`
//! accounts, `S...` seeds and `C...` contracts. A well-formed strkey of
//! another flavour is reported as [`StrkeyError::WrongKind`].

use remit_types::{ContractAddress, PrivateKey, PublicKey, StellarAddress};
use stellar_strkey::{ed25519, Contract, Strkey};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrkeyError {
    #[error("not a valid strkey")]
    Invalid,

    #[error("expected a {expected}... strkey, got {found}...")]
    WrongKind { expected: char, found: char },
}

/// The strkey flavours this crate understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrkeyKind {
    Account,
    Seed,
    Contract,
}

impl StrkeyKind {
    pub fn prefix(&self) -> char {
        match self {
            Self::Account => 'G',
            Self::Seed => 'S',
            Self::Contract => 'C',
        }
    }

    fn payload(&self, key: Strkey) -> Option<[u8; 32]> {
        match (self, key) {
            (Self::Account, Strkey::PublicKeyEd25519(ed25519::PublicKey(bytes))) => Some(bytes),
            (Self::Seed, Strkey::PrivateKeyEd25519(ed25519::PrivateKey(bytes))) => Some(bytes),
            (Self::Contract, Strkey::Contract(Contract(bytes))) => Some(bytes),
            _ => None,
        }
    }
}

/// Decode a strkey of the given kind back into its 32-byte payload.
pub fn decode(kind: StrkeyKind, s: &str) -> Result<[u8; 32], StrkeyError> {
    let key = Strkey::from_string(s).map_err(|_| StrkeyError::Invalid)?;
    kind.payload(key).ok_or_else(|| StrkeyError::WrongKind {
        expected: kind.prefix(),
        found: s.chars().next().unwrap_or('?'),
    })
}

/// Encode a public key as a `G...` account address.
pub fn encode_account(public_key: &PublicKey) -> StellarAddress {
    StellarAddress::new(ed25519::PublicKey(public_key.0).to_string())
}

/// Decode a `G...` account address into its public key.
pub fn decode_account(address: &str) -> Result<PublicKey, StrkeyError> {
    decode(StrkeyKind::Account, address).map(PublicKey)
}

/// Validate that an account address is well-formed and its checksum is correct.
pub fn validate_account(address: &str) -> bool {
    decode_account(address).is_ok()
}

/// Encode a contract hash as a `C...` contract address.
pub fn encode_contract(contract_hash: &[u8; 32]) -> ContractAddress {
    ContractAddress::new(Contract(*contract_hash).to_string())
}

/// Decode a `C...` contract address into its contract hash.
pub fn decode_contract(address: &str) -> Result<[u8; 32], StrkeyError> {
    decode(StrkeyKind::Contract, address)
}

/// Encode a private key as an `S...` secret seed.
pub fn encode_secret(private_key: &PrivateKey) -> String {
    ed25519::PrivateKey(private_key.0).to_string()
}

/// Decode an `S...` secret seed.
pub fn decode_secret(secret: &str) -> Result<PrivateKey, StrkeyError> {
    decode(StrkeyKind::Seed, secret).map(PrivateKey)
}
