use remit_client::ClientError;
use remit_transactions::{ValidationError, XdrError};
use remit_types::NetworkId;
use std::fmt;
use thiserror::Error;

/// Contract resolution and signing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("no split contract configured for {network}")]
    NotConfigured { network: NetworkId },

    #[error("invalid contract id {contract_id}: {reason}")]
    InvalidContractId { contract_id: String, reason: String },

    #[error("custodial signing failed: {0}")]
    SigningFailed(String),

    #[error("cannot encode contract call: {0}")]
    Encoding(#[from] XdrError),
}

/// Every way a split transaction build can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("network error: {0}")]
    Network(#[from] ClientError),

    #[error("simulation failed: {reason}")]
    Simulation { reason: String },
}

/// Coarse classification of a [`SplitError`], for mapping onto responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Contract,
    Network,
    Simulation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Contract => "contract",
            Self::Network => "network",
            Self::Simulation => "simulation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SplitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Contract(_) => ErrorKind::Contract,
            Self::Network(_) => ErrorKind::Network,
            Self::Simulation { .. } => ErrorKind::Simulation,
        }
    }

    /// True only for transient network failures. Nothing is retried internally.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_transient(),
            _ => false,
        }
    }
}
