//! Clients for the collaborators a split transaction build depends on.
//!
//! - [`LedgerClient`]: sequence numbers, fee stats and simulation, served in
//!   production by [`SorobanRpcClient`] over JSON-RPC
//! - [`Custodian`]: server-held keys for custodial signing, served by
//!   [`KeyCustodian`]
//!
//! Both are traits so the builder can run against deterministic doubles.

pub mod custody;
pub mod error;
pub mod ledger;
pub mod rpc;

pub use custody::{Custodian, CustodyError, KeyCustodian, SignedHash};
pub use error::ClientError;
pub use ledger::{FeeStats, LedgerClient, SimulationResponse};
pub use rpc::SorobanRpcClient;
