//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! Every external collaborator of a transaction build (clock, ledger,
//! custody) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically, including injected failures
//! - Record the calls made against them
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod custody;
pub mod ledger;

pub use clock::NullClock;
pub use custody::NullCustodian;
pub use ledger::{LedgerCall, NullLedgerClient, NULL_RESOURCE_FEE, NULL_SOROBAN_DATA};
