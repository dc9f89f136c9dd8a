//! Split percentages: the four buckets incoming remittances are divided into.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Bucket names, in the order they are passed to the contract.
pub const SPLIT_FIELDS: [&str; 4] = ["spending", "savings", "bills", "insurance"];

/// The total every split must add up to.
pub const TOTAL_PERCENT: u64 = 100;

/// Loosely typed percentages as they arrive in a request body.
///
/// A field that is absent or `null` deserializes to `None` and is reported
/// as missing by [`crate::validation::validate_percentages`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageInput {
    #[serde(default)]
    pub spending: Option<f64>,
    #[serde(default)]
    pub savings: Option<f64>,
    #[serde(default)]
    pub bills: Option<f64>,
    #[serde(default)]
    pub insurance: Option<f64>,
}

impl PercentageInput {
    /// Input with all four fields present.
    pub fn new(spending: f64, savings: f64, bills: f64, insurance: f64) -> Self {
        Self {
            spending: Some(spending),
            savings: Some(savings),
            bills: Some(bills),
            insurance: Some(insurance),
        }
    }

    /// Every field paired with its name, in contract order.
    pub fn fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            (SPLIT_FIELDS[0], self.spending),
            (SPLIT_FIELDS[1], self.savings),
            (SPLIT_FIELDS[2], self.bills),
            (SPLIT_FIELDS[3], self.insurance),
        ]
    }

    /// Names of the absent fields, in contract order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}

/// A validated split. Every value is a whole percentage and the four sum to 100.
///
/// The only ways to obtain one are [`SplitPercentages::new`] and
/// [`crate::validation::validate_percentages`], so holding a value is proof
/// the invariant was checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SplitPercentages {
    spending: u32,
    savings: u32,
    bills: u32,
    insurance: u32,
}

impl SplitPercentages {
    /// Check that the four values sum to exactly 100.
    pub fn new(
        spending: u32,
        savings: u32,
        bills: u32,
        insurance: u32,
    ) -> Result<Self, ValidationError> {
        let actual_sum = spending as u64 + savings as u64 + bills as u64 + insurance as u64;
        if actual_sum != TOTAL_PERCENT {
            return Err(ValidationError::SumMismatch { actual_sum });
        }
        Ok(Self {
            spending,
            savings,
            bills,
            insurance,
        })
    }

    pub fn spending(&self) -> u32 {
        self.spending
    }

    pub fn savings(&self) -> u32 {
        self.savings
    }

    pub fn bills(&self) -> u32 {
        self.bills
    }

    pub fn insurance(&self) -> u32 {
        self.insurance
    }

    /// Values in contract argument order: spending, savings, bills, insurance.
    pub fn as_contract_args(&self) -> [u32; 4] {
        [self.spending, self.savings, self.bills, self.insurance]
    }
}
