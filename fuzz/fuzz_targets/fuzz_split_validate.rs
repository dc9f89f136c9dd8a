#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use remit_transactions::{validate_percentages, PercentageInput};

#[derive(Debug, Arbitrary)]
struct Input {
    spending: Option<f64>,
    savings: Option<f64>,
    bills: Option<f64>,
    insurance: Option<f64>,
}

// Whatever validation accepts is whole, non-negative and sums to 100.
fuzz_target!(|input: Input| {
    let input = PercentageInput {
        spending: input.spending,
        savings: input.savings,
        bills: input.bills,
        insurance: input.insurance,
    };
    if let Ok(split) = validate_percentages(&input) {
        let args = split.as_contract_args();
        assert_eq!(args.iter().map(|&v| v as u64).sum::<u64>(), 100);
        let raw = [input.spending, input.savings, input.bills, input.insurance];
        for (value, arg) in raw.iter().zip(args) {
            assert_eq!(*value, Some(arg as f64));
        }
    }
});
