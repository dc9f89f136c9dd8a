#![no_main]

use libfuzzer_sys::fuzz_target;
use remit_crypto::{decode_account, decode_contract, decode_secret, encode_account, encode_contract};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(key) = decode_account(text) {
        assert_eq!(encode_account(&key).as_str(), text);
    }
    if let Ok(hash) = decode_contract(text) {
        assert_eq!(encode_contract(&hash).as_str(), text);
    }
    let _ = decode_secret(text);
});
