//! Human-checkable summary of a serialized envelope.

use remit_crypto::{encode_account, encode_contract, network_id};
use remit_transactions::xdr::{
    AccountId, Hash, Preconditions, PublicKey as XdrPublicKey, ScAddress, ScVal, Uint256,
};
use remit_transactions::{Envelope, SplitCall};
use remit_types::{NetworkId, PublicKey};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub source_account: String,
    pub fee: u32,
    pub seq_num: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_bounds: Option<[u64; 2]>,
    pub operations: Vec<Value>,
    /// Recognised split call, if the first operation is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<Value>,
    /// Resource fee of the attached Soroban data; absent until simulated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_fee: Option<i64>,
    pub auth_entries: usize,
    pub signatures: usize,
    /// Whether the source account signed for `network`.
    pub signed_by_source: bool,
    pub network: NetworkId,
}

pub fn summarize(envelope: &Envelope, network: NetworkId, passphrase: &str) -> EnvelopeSummary {
    let tx = envelope.tx();
    let time_bounds = match &tx.cond {
        Preconditions::Time(tb) => Some([tb.min_time.0, tb.max_time.0]),
        _ => None,
    };
    let operations = envelope
        .invocation()
        .map(|invocation| {
            json!({
                "contract": address_string(&invocation.contract_address),
                "function": invocation.function_name.0.to_utf8_string_lossy(),
                "args": invocation.args.iter().map(scval_json).collect::<Vec<_>>(),
            })
        })
        .into_iter()
        .collect();
    let split = envelope
        .invocation()
        .and_then(SplitCall::from_invocation)
        .map(|call| {
            let [spending, savings, bills, insurance] = call.percentages;
            let mut summary = json!({
                "function": call.function.function_name(),
                "spending": spending,
                "savings": savings,
                "bills": bills,
                "insurance": insurance,
            });
            summary[call.function.account_role()] = json!(encode_account(&call.account).as_str());
            summary
        });
    let source = envelope.source_key();

    EnvelopeSummary {
        source_account: encode_account(&source).to_string(),
        fee: tx.fee,
        seq_num: tx.seq_num.0,
        time_bounds,
        operations,
        split,
        resource_fee: envelope.soroban_data().map(|data| data.resource_fee),
        auth_entries: envelope.auth().len(),
        signatures: envelope.signatures().len(),
        signed_by_source: envelope.is_signed_by(&source, &network_id(passphrase)),
        network,
    }
}

fn address_string(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(AccountId(XdrPublicKey::PublicKeyTypeEd25519(Uint256(key)))) => {
            encode_account(&PublicKey(*key)).to_string()
        }
        ScAddress::Contract(Hash(hash)) => encode_contract(hash).to_string(),
    }
}

fn scval_json(val: &ScVal) -> Value {
    match val {
        ScVal::Bool(b) => json!(b),
        ScVal::Void => Value::Null,
        ScVal::U32(v) => json!(v),
        ScVal::I32(v) => json!(v),
        ScVal::U64(v) => json!(v),
        ScVal::I64(v) => json!(v),
        ScVal::Symbol(s) => json!({ "symbol": s.0.to_utf8_string_lossy() }),
        ScVal::Address(a) => json!({ "address": address_string(a) }),
        other => json!({ "type": other.name() }),
    }
}
