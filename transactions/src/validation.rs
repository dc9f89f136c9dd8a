//! Split percentage validation.
//!
//! Checks run in a fixed order so the most fundamental problem is reported
//! first: missing fields, then negative values, then fractional values, then
//! the sum. Validation is pure and never touches the ledger.

use crate::error::ValidationError;
use crate::split::{PercentageInput, SplitPercentages};

/// Validate loosely typed percentages and produce a [`SplitPercentages`].
///
/// Zero is an allowed value, so `0/0/0/100` is a valid split.
pub fn validate_percentages(input: &PercentageInput) -> Result<SplitPercentages, ValidationError> {
    let (Some(spending), Some(savings), Some(bills), Some(insurance)) =
        (input.spending, input.savings, input.bills, input.insurance)
    else {
        return Err(ValidationError::MissingField {
            fields: input.missing_fields(),
        });
    };

    let fields = [
        ("spending", spending),
        ("savings", savings),
        ("bills", bills),
        ("insurance", insurance),
    ];

    if let Some(&(field, value)) = fields.iter().find(|(_, value)| *value < 0.0) {
        return Err(ValidationError::NegativePercentage { field, value });
    }

    let mut whole = [0u32; 4];
    for (slot, &(field, value)) in whole.iter_mut().zip(fields.iter()) {
        *slot = whole_percent(value)
            .ok_or(ValidationError::NonIntegerPercentage { field, value })?;
    }

    let [spending, savings, bills, insurance] = whole;
    SplitPercentages::new(spending, savings, bills, insurance)
}

/// A non-negative value that is an exact `u32`, or `None`.
fn whole_percent(value: f64) -> Option<u32> {
    // NaN and infinities have a NaN fractional part.
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}
