//! The two split contract calls and their fixed argument layout.
//!
//! Both functions take `(account, spending, savings, bills, insurance)`.
//! The account is bound as the owner for `initialize` and as the caller for
//! `update`.

use remit_types::PublicKey;
use stellar_xdr::curr::{
    AccountId, Hash, InvokeContractArgs, PublicKey as XdrPublicKey, ScAddress, ScSymbol, ScVal,
    StringM, Uint256,
};

use crate::error::XdrError;
use crate::split::SplitPercentages;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitFunction {
    /// Create the split for a new owner.
    Initialize,
    /// Change an existing split.
    Update,
}

impl SplitFunction {
    /// Contract function symbol.
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Update => "update",
        }
    }

    /// Role the account argument plays in the call.
    pub fn account_role(&self) -> &'static str {
        match self {
            Self::Initialize => "owner",
            Self::Update => "caller",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Self::Initialize),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

/// `ScAddress` of an ed25519 account.
pub fn account_address(key: &PublicKey) -> ScAddress {
    ScAddress::Account(AccountId(XdrPublicKey::PublicKeyTypeEd25519(Uint256(key.0))))
}

/// Build the contract call for `function` on behalf of `account`.
pub fn split_invocation(
    function: SplitFunction,
    contract: [u8; 32],
    account: &PublicKey,
    split: &SplitPercentages,
) -> Result<InvokeContractArgs, XdrError> {
    let mut args = Vec::with_capacity(5);
    args.push(ScVal::Address(account_address(account)));
    args.extend(split.as_contract_args().into_iter().map(ScVal::U32));

    Ok(InvokeContractArgs {
        contract_address: ScAddress::Contract(Hash(contract)),
        function_name: ScSymbol(StringM::try_from(function.function_name())?),
        args: args.try_into()?,
    })
}

/// A split call recovered from an invocation, for structural comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitCall {
    pub function: SplitFunction,
    pub contract: [u8; 32],
    pub account: PublicKey,
    /// spending, savings, bills, insurance
    pub percentages: [u32; 4],
}

impl SplitCall {
    /// Recognise a split call. Returns `None` for any other invocation shape.
    pub fn from_invocation(invocation: &InvokeContractArgs) -> Option<Self> {
        let name = invocation.function_name.0.to_utf8_string().ok()?;
        let function = SplitFunction::from_function_name(&name)?;
        let ScAddress::Contract(Hash(contract)) = &invocation.contract_address else {
            return None;
        };
        let [account, spending, savings, bills, insurance] = invocation.args.as_slice() else {
            return None;
        };
        let ScVal::Address(ScAddress::Account(AccountId(XdrPublicKey::PublicKeyTypeEd25519(
            Uint256(account),
        )))) = account
        else {
            return None;
        };
        Some(Self {
            function,
            contract: *contract,
            account: PublicKey(*account),
            percentages: [
                u32_arg(spending)?,
                u32_arg(savings)?,
                u32_arg(bills)?,
                u32_arg(insurance)?,
            ],
        })
    }
}

fn u32_arg(val: &ScVal) -> Option<u32> {
    match val {
        ScVal::U32(v) => Some(*v),
        _ => None,
    }
}
