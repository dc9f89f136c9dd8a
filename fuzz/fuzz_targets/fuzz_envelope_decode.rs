#![no_main]

use libfuzzer_sys::fuzz_target;
use remit_transactions::{Envelope, SplitCall};

// Decoding arbitrary bytes never panics, and anything that decodes
// re-encodes to exactly the input.
fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = Envelope::from_xdr(data) {
        let encoded = envelope.to_xdr().expect("decoded envelope re-encodes");
        assert_eq!(encoded, data, "canonical encoding must be stable");
        let _ = envelope.hash(&[0u8; 32]);
        let _ = envelope.invocation().and_then(SplitCall::from_invocation);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Envelope::from_base64(text);
    }
});
