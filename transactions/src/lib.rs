//! Split validation and the Soroban transaction model.
//!
//! - **split / validation**: the four-bucket percentage rule (each ≥ 0, sum = 100)
//! - **invocation**: the `initialize` / `update` contract calls and their argument order
//! - **envelope**: adapters over `stellar-xdr` for building, simulating, signing
//!   and decoding a single-call envelope

pub mod envelope;
pub mod error;
pub mod invocation;
pub mod split;
pub mod validation;

pub use envelope::{
    account_key, decode_auth_entry, decode_soroban_data, invoke_contract_tx, muxed_account,
    transaction_hash, Envelope, MIN_BASE_FEE,
};
pub use error::{ValidationError, XdrError};
pub use invocation::{account_address, split_invocation, SplitCall, SplitFunction};
pub use split::{PercentageInput, SplitPercentages, SPLIT_FIELDS};
pub use validation::validate_percentages;

/// The `stellar-xdr` types the envelope adapters speak.
pub use stellar_xdr::curr as xdr;
