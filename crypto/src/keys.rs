//! Ed25519 key derivation.

use remit_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

use crate::strkey::{decode_secret, StrkeyError};

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let private = PrivateKey(*seed);
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Load a key pair from an `S...` secret seed.
pub fn keypair_from_secret(secret: &str) -> Result<KeyPair, StrkeyError> {
    let private = decode_secret(secret)?;
    let public = public_from_private(&private);
    Ok(KeyPair { public, private })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strkey::encode_account;

    #[test]
    fn keypair_from_seed_deterministic() {
        let kp1 = keypair_from_seed(&[42u8; 32]);
        let kp2 = keypair_from_seed(&[42u8; 32]);
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_eq!(kp1.private.0, kp2.private.0);
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        assert_ne!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn known_secret_derives_known_account() {
        let kp = keypair_from_secret("SBU2RRGLXH3E5CQHTD3ODLDF2BWDCYUSSBLLZ5GNW7JXHDIYKXZWHOKR")
            .unwrap();
        assert_eq!(
            encode_account(&kp.public).as_str(),
            "GA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES5"
        );
    }

    #[test]
    fn account_address_is_not_a_secret() {
        assert!(
            keypair_from_secret("GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H").is_err()
        );
    }
}
