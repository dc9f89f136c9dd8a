//! Cryptographic primitives for Stellar transactions.
//!
//! - **Ed25519** for signing and signature verification
//! - **SHA-256** for network ids and transaction hashes
//! - **Strkey** addresses (`G...` accounts, `S...` seeds, `C...` contracts)
//!   via `stellar-strkey`

pub mod hash;
pub mod keys;
pub mod sign;
pub mod strkey;

pub use hash::{network_id, sha256, sha256_multi};
pub use keys::{keypair_from_secret, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
pub use strkey::{
    decode_account, decode_contract, decode_secret, encode_account, encode_contract,
    encode_secret, validate_account, StrkeyError, StrkeyKind,
};
