//! Transaction building for the remittance split contract.
//!
//! Provides everything a request handler needs after validation:
//! - Contract resolution per network, from [`BuilderConfig`]
//! - Envelope assembly for the `initialize` and `update` calls
//! - Optional simulation through the injected [`remit_client::LedgerClient`]
//! - Optional custodial signing through the injected [`remit_client::Custodian`]
//!
//! ```text
//! PercentageInput ─validate_percentages─▶ SplitPercentages
//!     ─SplitTxBuilder::build_*_split_tx─▶ TransactionResult
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod result;
pub mod transaction_builder;

pub use config::{BuilderConfig, ConfigError, NetworkConfig, NetworkTable};
pub use error::{ContractError, ErrorKind, SplitError};
pub use options::BuildOptions;
pub use result::{SimulationSummary, TransactionResult};
pub use transaction_builder::SplitTxBuilder;
