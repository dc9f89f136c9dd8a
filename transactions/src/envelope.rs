//! Envelope handling over the `stellar-xdr` transaction model.
//!
//! A build produces an `ENVELOPE_TYPE_TX` envelope holding one
//! `INVOKE_HOST_FUNCTION` operation:
//!
//! ```text
//! TransactionEnvelope::Tx
//!   ├─ Transaction
//!   │    ├─ sourceAccount (ed25519), fee, seqNum
//!   │    ├─ cond  (PRECOND_TIME)
//!   │    ├─ operations[0]  INVOKE_HOST_FUNCTION → InvokeContractArgs, auth<>
//!   │    └─ ext   v0 until simulated, then v1 (SorobanTransactionData)
//!   └─ signatures<20>
//! ```
//!
//! The network only accepts the invocation once [`Envelope::apply_simulation`]
//! has attached the footprint, resource fee and authorization entries.

use remit_crypto::{sha256, verify_signature};
use remit_types::{PublicKey, Signature};
use stellar_xdr::curr::{
    self as xdr, DecoratedSignature, Hash, HostFunction, InvokeContractArgs,
    InvokeHostFunctionOp, Limits, Memo, MuxedAccount, Operation, OperationBody, Preconditions,
    ReadXdr, SequenceNumber, SignatureHint, SorobanAuthorizationEntry, SorobanTransactionData,
    TimeBounds, TimePoint, Transaction, TransactionExt, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, Uint256, VecM, WriteXdr,
};

use crate::error::XdrError;

/// Protocol minimum inclusion fee per operation, in stroops.
pub const MIN_BASE_FEE: u32 = 100;

const MAX_DECODE_LEN: usize = 256 * 1024;
const MAX_DECODE_DEPTH: u32 = 500;

fn decode_limits() -> Limits {
    Limits {
        depth: MAX_DECODE_DEPTH,
        len: MAX_DECODE_LEN,
    }
}

pub fn muxed_account(key: &PublicKey) -> MuxedAccount {
    MuxedAccount::Ed25519(Uint256(key.0))
}

/// The ed25519 key behind a plain or multiplexed account.
pub fn account_key(account: &MuxedAccount) -> PublicKey {
    match account {
        MuxedAccount::Ed25519(Uint256(key)) => PublicKey(*key),
        MuxedAccount::MuxedEd25519(muxed) => PublicKey(muxed.ed25519.0),
    }
}

/// A transaction from `source` calling `invocation` once, valid until
/// `max_time` (Unix seconds).
pub fn invoke_contract_tx(
    source: &PublicKey,
    fee: u32,
    seq_num: i64,
    max_time: u64,
    invocation: InvokeContractArgs,
) -> Result<Transaction, XdrError> {
    let operation = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(invocation),
            auth: VecM::default(),
        }),
    };
    Ok(Transaction {
        source_account: muxed_account(source),
        fee,
        seq_num: SequenceNumber(seq_num),
        cond: Preconditions::Time(TimeBounds {
            min_time: TimePoint(0),
            max_time: TimePoint(max_time),
        }),
        memo: Memo::None,
        operations: vec![operation].try_into()?,
        ext: TransactionExt::V0,
    })
}

/// The hash every signer signs:
/// `SHA-256(TransactionSignaturePayload { network_id, ENVELOPE_TYPE_TX, tx })`.
pub fn transaction_hash(tx: &Transaction, network_id: &[u8; 32]) -> Result<[u8; 32], XdrError> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(*network_id),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    Ok(sha256(&payload.to_xdr(Limits::none())?))
}

/// Decode the base64 `SorobanTransactionData` a simulation returns.
pub fn decode_soroban_data(encoded: &str) -> Result<SorobanTransactionData, XdrError> {
    Ok(SorobanTransactionData::from_xdr_base64(
        encoded.trim(),
        decode_limits(),
    )?)
}

/// Decode one base64 `SorobanAuthorizationEntry` from a simulation result.
pub fn decode_auth_entry(encoded: &str) -> Result<SorobanAuthorizationEntry, XdrError> {
    Ok(SorobanAuthorizationEntry::from_xdr_base64(
        encoded.trim(),
        decode_limits(),
    )?)
}

fn invoke_op(tx: &Transaction) -> Option<&InvokeHostFunctionOp> {
    match &tx.operations.first()?.body {
        OperationBody::InvokeHostFunction(op) => Some(op),
        _ => None,
    }
}

/// A v1 transaction envelope plus the signatures collected so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope(TransactionV1Envelope);

impl Envelope {
    pub fn unsigned(tx: Transaction) -> Self {
        Self(TransactionV1Envelope {
            tx,
            signatures: VecM::default(),
        })
    }

    pub fn tx(&self) -> &Transaction {
        &self.0.tx
    }

    pub fn source_key(&self) -> PublicKey {
        account_key(&self.0.tx.source_account)
    }

    /// The contract call of the first operation, if it is one.
    pub fn invocation(&self) -> Option<&InvokeContractArgs> {
        match &invoke_op(&self.0.tx)?.host_function {
            HostFunction::InvokeContract(args) => Some(args),
            _ => None,
        }
    }

    /// Authorization entries attached to the invocation.
    pub fn auth(&self) -> &[SorobanAuthorizationEntry] {
        invoke_op(&self.0.tx)
            .map(|op| op.auth.as_slice())
            .unwrap_or_default()
    }

    /// The Soroban resources, present once a simulation has been applied.
    pub fn soroban_data(&self) -> Option<&SorobanTransactionData> {
        match &self.0.tx.ext {
            TransactionExt::V1(data) => Some(data),
            TransactionExt::V0 => None,
        }
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        self.0.signatures.as_slice()
    }

    pub fn is_signed(&self) -> bool {
        !self.0.signatures.is_empty()
    }

    pub fn hash(&self, network_id: &[u8; 32]) -> Result<[u8; 32], XdrError> {
        transaction_hash(&self.0.tx, network_id)
    }

    /// Attach what a simulation reported: `transaction_data` becomes the
    /// `ext` v1 payload, `auth` replaces the invocation's authorization
    /// entries and `resource_fee` is added to the current (inclusion) fee.
    ///
    /// Signatures already attached are discarded since the hash changes.
    pub fn apply_simulation(
        &mut self,
        transaction_data: SorobanTransactionData,
        auth: Vec<SorobanAuthorizationEntry>,
        resource_fee: u32,
    ) -> Result<(), XdrError> {
        let tx = &mut self.0.tx;
        let fee = tx
            .fee
            .checked_add(resource_fee)
            .ok_or(XdrError::FeeOverflow {
                fee: tx.fee,
                resource_fee,
            })?;

        let mut operations = tx.operations.to_vec();
        match operations.first_mut().map(|op| &mut op.body) {
            Some(OperationBody::InvokeHostFunction(op)) => op.auth = auth.try_into()?,
            _ => return Err(XdrError::NoInvocation),
        }
        tx.operations = operations.try_into()?;
        tx.ext = TransactionExt::V1(transaction_data);
        tx.fee = fee;
        self.0.signatures = VecM::default();
        Ok(())
    }

    /// Attach a signature produced by `signer` over [`Envelope::hash`].
    pub fn add_signature(
        &mut self,
        signer: &PublicKey,
        signature: &Signature,
    ) -> Result<(), XdrError> {
        let mut signatures = self.0.signatures.to_vec();
        signatures.push(DecoratedSignature {
            hint: SignatureHint(signer.hint()),
            signature: xdr::Signature(signature.0.to_vec().try_into()?),
        });
        self.0.signatures = signatures.try_into()?;
        Ok(())
    }

    /// Whether some attached signature was made by `signer` over this
    /// transaction on the given network.
    pub fn is_signed_by(&self, signer: &PublicKey, network_id: &[u8; 32]) -> bool {
        let Ok(hash) = self.hash(network_id) else {
            return false;
        };
        let hint = SignatureHint(signer.hint());
        self.0
            .signatures
            .iter()
            .filter(|sig| sig.hint == hint)
            .filter_map(|sig| <[u8; 64]>::try_from(sig.signature.0.as_slice()).ok())
            .any(|bytes| verify_signature(&hash, &Signature(bytes), signer))
    }

    pub fn to_xdr(&self) -> Result<Vec<u8>, XdrError> {
        Ok(self.to_xdr_envelope().to_xdr(Limits::none())?)
    }

    /// Base64 of the XDR encoding: the transport string wallets consume.
    pub fn to_base64(&self) -> Result<String, XdrError> {
        Ok(self.to_xdr_envelope().to_xdr_base64(Limits::none())?)
    }

    pub fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        Self::from_xdr_envelope(xdr::TransactionEnvelope::from_xdr(bytes, decode_limits())?)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, XdrError> {
        Self::from_xdr_envelope(xdr::TransactionEnvelope::from_xdr_base64(
            encoded.trim(),
            decode_limits(),
        )?)
    }

    /// Accept a decoded envelope. Legacy v0 and fee-bump envelopes are refused.
    pub fn from_xdr_envelope(envelope: xdr::TransactionEnvelope) -> Result<Self, XdrError> {
        match envelope {
            xdr::TransactionEnvelope::Tx(v1) => Ok(Self(v1)),
            xdr::TransactionEnvelope::TxV0(_) => Err(XdrError::UnsupportedEnvelope("TxV0")),
            xdr::TransactionEnvelope::TxFeeBump(_) => {
                Err(XdrError::UnsupportedEnvelope("TxFeeBump"))
            }
        }
    }

    fn to_xdr_envelope(&self) -> xdr::TransactionEnvelope {
        xdr::TransactionEnvelope::Tx(self.0.clone())
    }
}

impl From<Envelope> for xdr::TransactionEnvelope {
    fn from(envelope: Envelope) -> Self {
        Self::Tx(envelope.0)
    }
}
