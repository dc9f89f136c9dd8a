//! Fundamental types for remittance split transactions.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! Stellar account and contract addresses, Ed25519 key material, network
//! identifiers, and timestamps.

pub mod address;
pub mod keys;
pub mod network;
pub mod time;

pub use address::{ContractAddress, StellarAddress};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use time::{Clock, SystemClock, Timestamp};
