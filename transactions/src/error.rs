use thiserror::Error;

/// Rejections produced while checking a split before any ledger interaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required percentage field(s): {}", fields.join(", "))]
    MissingField { fields: Vec<&'static str> },

    #[error("percentages must not be negative: {field} is {value}")]
    NegativePercentage { field: &'static str, value: f64 },

    #[error("percentages must be whole numbers: {field} is {value}")]
    NonIntegerPercentage { field: &'static str, value: f64 },

    #[error("percentages must sum to 100, got {actual_sum}")]
    SumMismatch { actual_sum: u64 },

    #[error("invalid account address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
}

impl ValidationError {
    /// The fields named by a `MissingField` rejection, empty otherwise.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingField { fields } => fields,
            _ => &[],
        }
    }
}

/// Failures while encoding, decoding or amending an envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XdrError {
    /// The XDR codec rejected the value or the input.
    #[error("xdr: {0}")]
    Codec(String),

    #[error("unsupported envelope type {0}")]
    UnsupportedEnvelope(&'static str),

    #[error("transaction carries no contract invocation")]
    NoInvocation,

    #[error("fee {fee} plus resource fee {resource_fee} overflows")]
    FeeOverflow { fee: u32, resource_fee: u32 },
}

impl From<stellar_xdr::curr::Error> for XdrError {
    fn from(err: stellar_xdr::curr::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
