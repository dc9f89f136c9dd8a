//! Server-held signing keys.

use std::collections::HashMap;

use async_trait::async_trait;
use remit_crypto::{encode_account, keypair_from_secret, sign_message};
use remit_types::{KeyPair, PublicKey, Signature, StellarAddress};
use thiserror::Error;

/// A signature over a transaction hash, with the key that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHash {
    pub signer: PublicKey,
    pub signature: Signature,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("no custodial key held for {0}")]
    UnknownAccount(String),

    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("custody backend failed: {0}")]
    Backend(String),
}

/// Signs transaction hashes with keys the service holds for its users.
#[async_trait]
pub trait Custodian: Send + Sync {
    async fn sign_hash(
        &self,
        account: &StellarAddress,
        hash: &[u8; 32],
    ) -> Result<SignedHash, CustodyError>;
}

/// In-process custodian over a fixed set of key pairs.
#[derive(Default)]
pub struct KeyCustodian {
    keys: HashMap<StellarAddress, KeyPair>,
}

impl KeyCustodian {
    pub fn new() -> Self {
        Self::default()
    }

    /// A custodian holding the single key behind `secret`.
    pub fn with_secret(secret: &str) -> Result<Self, CustodyError> {
        let mut custodian = Self::new();
        custodian.insert_secret(secret)?;
        Ok(custodian)
    }

    /// Read an `S...` secret from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, CustodyError> {
        let secret = std::env::var(var).map_err(|_| {
            CustodyError::KeyUnavailable(format!("environment variable {var} not set"))
        })?;
        Self::with_secret(secret.trim())
    }

    /// Add a key and return the account it controls.
    pub fn insert_secret(&mut self, secret: &str) -> Result<StellarAddress, CustodyError> {
        let keypair = keypair_from_secret(secret)
            .map_err(|e| CustodyError::KeyUnavailable(format!("invalid secret seed: {e}")))?;
        Ok(self.insert(keypair))
    }

    pub fn insert(&mut self, keypair: KeyPair) -> StellarAddress {
        let address = encode_account(&keypair.public);
        self.keys.insert(address.clone(), keypair);
        address
    }

    pub fn holds(&self, account: &StellarAddress) -> bool {
        self.keys.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl Custodian for KeyCustodian {
    async fn sign_hash(
        &self,
        account: &StellarAddress,
        hash: &[u8; 32],
    ) -> Result<SignedHash, CustodyError> {
        let keypair = self
            .keys
            .get(account)
            .ok_or_else(|| CustodyError::UnknownAccount(account.to_string()))?;
        Ok(SignedHash {
            signer: keypair.public.clone(),
            signature: sign_message(hash, &keypair.private),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remit_crypto::verify_signature;

    const SECRET: &str = "SBU2RRGLXH3E5CQHTD3ODLDF2BWDCYUSSBLLZ5GNW7JXHDIYKXZWHOKR";
    const ACCOUNT: &str = "GA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES5";

    #[tokio::test]
    async fn signs_for_held_account() {
        let custodian = KeyCustodian::with_secret(SECRET).unwrap();
        let account = StellarAddress::new(ACCOUNT);
        assert!(custodian.holds(&account));

        let hash = [9u8; 32];
        let signed = custodian.sign_hash(&account, &hash).await.unwrap();
        assert!(verify_signature(&hash, &signed.signature, &signed.signer));
    }

    #[tokio::test]
    async fn unknown_account_refused() {
        let custodian = KeyCustodian::with_secret(SECRET).unwrap();
        let other = StellarAddress::new("GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H");
        assert!(matches!(
            custodian.sign_hash(&other, &[0u8; 32]).await,
            Err(CustodyError::UnknownAccount(_))
        ));
    }

    #[test]
    fn bad_secret_rejected() {
        assert!(matches!(
            KeyCustodian::with_secret("SNOTASECRET"),
            Err(CustodyError::KeyUnavailable(_))
        ));
    }

    #[test]
    fn missing_env_var_is_key_unavailable() {
        assert!(matches!(
            KeyCustodian::from_env("REMIT_TEST_SECRET_THAT_IS_NEVER_SET"),
            Err(CustodyError::KeyUnavailable(_))
        ));
    }
}
