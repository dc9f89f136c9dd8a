//! Nullable custodian: signs with a fixed key or fails on demand.

use std::sync::Mutex;

use async_trait::async_trait;
use remit_client::{Custodian, CustodyError, SignedHash};
use remit_crypto::{encode_account, keypair_from_seed, sign_message};
use remit_types::{KeyPair, StellarAddress};

pub struct NullCustodian {
    keypair: KeyPair,
    failure: Mutex<Option<CustodyError>>,
    signed: Mutex<Vec<[u8; 32]>>,
}

impl NullCustodian {
    /// A custodian holding the key derived from `seed`.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: keypair_from_seed(&seed),
            failure: Mutex::new(None),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// The account this custodian signs for.
    pub fn account(&self) -> StellarAddress {
        encode_account(&self.keypair.public)
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Every subsequent signature request fails with `error`.
    pub fn fail_with(&self, error: CustodyError) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Hashes signed so far, in order.
    pub fn signed_hashes(&self) -> Vec<[u8; 32]> {
        self.signed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Custodian for NullCustodian {
    async fn sign_hash(
        &self,
        account: &StellarAddress,
        hash: &[u8; 32],
    ) -> Result<SignedHash, CustodyError> {
        if let Some(err) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(err);
        }
        if *account != self.account() {
            return Err(CustodyError::UnknownAccount(account.to_string()));
        }
        self.signed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(*hash);
        Ok(SignedHash {
            signer: self.keypair.public.clone(),
            signature: sign_message(hash, &self.keypair.private),
        })
    }
}
