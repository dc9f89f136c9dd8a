//! Assembles, simulates and signs split contract transactions.

use std::sync::Arc;

use remit_client::{Custodian, LedgerClient};
use remit_crypto::{decode_account, decode_contract, network_id};
use remit_transactions::{
    decode_auth_entry, decode_soroban_data, invoke_contract_tx, split_invocation, Envelope,
    SplitFunction, SplitPercentages, ValidationError, MIN_BASE_FEE,
};
use remit_types::{Clock, NetworkId, PublicKey, StellarAddress, SystemClock};
use tracing::{debug, info, warn};

use crate::config::BuilderConfig;
use crate::error::{ContractError, SplitError};
use crate::options::BuildOptions;
use crate::result::{SimulationSummary, TransactionResult};

/// Builds `initialize` / `update` transactions for the split contract.
///
/// Holds only read-only configuration and shared collaborators, so one
/// builder can serve concurrent requests.
pub struct SplitTxBuilder {
    config: BuilderConfig,
    ledger: Arc<dyn LedgerClient>,
    custodian: Option<Arc<dyn Custodian>>,
    clock: Arc<dyn Clock>,
}

impl SplitTxBuilder {
    pub fn new(config: BuilderConfig, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            config,
            ledger,
            custodian: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Enable custodial signing.
    pub fn with_custodian(mut self, custodian: Arc<dyn Custodian>) -> Self {
        self.custodian = Some(custodian);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the call that creates a split, with `owner` as owner and source.
    pub async fn build_initialize_split_tx(
        &self,
        owner: &str,
        split: &SplitPercentages,
        options: &BuildOptions,
    ) -> Result<TransactionResult, SplitError> {
        self.build(SplitFunction::Initialize, owner, split, options)
            .await
    }

    /// Build the call that changes a split, with `caller` as caller and source.
    pub async fn build_update_split_tx(
        &self,
        caller: &str,
        split: &SplitPercentages,
        options: &BuildOptions,
    ) -> Result<TransactionResult, SplitError> {
        self.build(SplitFunction::Update, caller, split, options)
            .await
    }

    async fn build(
        &self,
        function: SplitFunction,
        identifier: &str,
        split: &SplitPercentages,
        options: &BuildOptions,
    ) -> Result<TransactionResult, SplitError> {
        let account = parse_account(identifier)?;
        let address = StellarAddress::new(identifier);
        let network = options.network.unwrap_or(self.config.network);
        let contract = self.resolve_contract(network, options)?;

        let custodian = match (options.custodial, &self.custodian) {
            (false, _) => None,
            (true, Some(custodian)) => Some(custodian),
            (true, None) => {
                return Err(ContractError::SigningFailed(
                    "custodial mode requested but no custodian is configured".into(),
                )
                .into())
            }
        };

        info!(
            function = function.function_name(),
            role = function.account_role(),
            account = %address,
            %network,
            simulate = options.simulate,
            custodial = options.custodial,
            "building split transaction"
        );

        let current_seq = self.ledger.account_sequence(&address).await?;
        let seq_num = current_seq.checked_add(1).ok_or_else(|| {
            remit_client::ClientError::InvalidResponse(format!(
                "sequence number {current_seq} cannot be incremented"
            ))
        })?;
        debug!(account = %address, seq_num, "resolved sequence number");

        let fee = self.resolve_fee(options).await?;
        let timeout = options.timeout_secs.unwrap_or(self.config.timeout_secs);
        let max_time = self.clock.now().plus_secs(timeout).as_secs();

        let invocation = split_invocation(function, contract, &account, split)
            .map_err(ContractError::Encoding)?;
        let tx = invoke_contract_tx(&account, fee, seq_num, max_time, invocation)
            .map_err(ContractError::Encoding)?;
        let mut envelope = Envelope::unsigned(tx);

        let simulation = if options.simulate {
            Some(self.simulate(&mut envelope).await?)
        } else {
            None
        };

        if let Some(custodian) = custodian {
            let passphrase = self.config.passphrase(network);
            let hash = envelope
                .hash(&network_id(passphrase))
                .map_err(ContractError::Encoding)?;
            let signed = custodian.sign_hash(&address, &hash).await.map_err(|e| {
                warn!(account = %address, error = %e, "custodial signing failed");
                ContractError::SigningFailed(e.to_string())
            })?;
            if signed.signer != account {
                warn!(account = %address, "custodian signed with a different key");
                return Err(ContractError::SigningFailed(format!(
                    "custodian key does not control {address}"
                ))
                .into());
            }
            envelope
                .add_signature(&signed.signer, &signed.signature)
                .map_err(ContractError::Encoding)?;
            debug!(account = %address, "transaction signed by custodian");
        }

        Ok(TransactionResult {
            serialized_transaction: envelope.to_base64().map_err(ContractError::Encoding)?,
            simulation,
        })
    }

    fn resolve_contract(
        &self,
        network: NetworkId,
        options: &BuildOptions,
    ) -> Result<[u8; 32], ContractError> {
        let contract_id = options
            .contract_id
            .as_deref()
            .or_else(|| self.config.contract_id(network))
            .ok_or(ContractError::NotConfigured { network })?;
        decode_contract(contract_id).map_err(|e| ContractError::InvalidContractId {
            contract_id: contract_id.to_string(),
            reason: e.to_string(),
        })
    }

    async fn resolve_fee(&self, options: &BuildOptions) -> Result<u32, SplitError> {
        let fee = match options.base_fee {
            Some(fee) => fee,
            None => {
                let stats = self.ledger.fee_stats().await?;
                debug!(p50 = stats.p50, p90 = stats.p90, "fetched fee stats");
                stats.p50
            }
        };
        Ok(fee.max(MIN_BASE_FEE))
    }

    /// Pre-execute `envelope` and fold the reported Soroban resources,
    /// authorization entries and resource fee into it.
    async fn simulate(&self, envelope: &mut Envelope) -> Result<SimulationSummary, SplitError> {
        let xdr = envelope.to_base64().map_err(ContractError::Encoding)?;
        let mut response = self.ledger.simulate_transaction(&xdr).await?;
        if let Some(reason) = response.error.take() {
            warn!(%reason, "simulation rejected the invocation");
            return Err(SplitError::Simulation { reason });
        }

        let transaction_data = response
            .transaction_data
            .as_deref()
            .ok_or_else(|| simulation_error("no transactionData in simulation response"))?;
        let transaction_data = decode_soroban_data(transaction_data)
            .map_err(|e| simulation_error(format!("transactionData: {e}")))?;
        let resource_fee = response
            .resource_fee()
            .map_err(|e| simulation_error(e.to_string()))?;
        let auth = response
            .auth_entries()
            .map_err(|e| simulation_error(e.to_string()))?
            .into_iter()
            .map(decode_auth_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| simulation_error(format!("auth entry: {e}")))?;
        let auth_entries = auth.len();

        envelope
            .apply_simulation(transaction_data, auth, resource_fee)
            .map_err(|e| simulation_error(e.to_string()))?;
        debug!(
            resource_fee,
            auth_entries,
            fee = envelope.tx().fee,
            "applied simulation"
        );
        Ok(SimulationSummary {
            cost: resource_fee.to_string(),
            results: response.results,
        })
    }
}

fn simulation_error(reason: impl Into<String>) -> SplitError {
    let reason = reason.into();
    warn!(%reason, "unusable simulation response");
    SplitError::Simulation { reason }
}

fn parse_account(identifier: &str) -> Result<PublicKey, ValidationError> {
    decode_account(identifier).map_err(|e| ValidationError::InvalidAddress {
        address: identifier.to_string(),
        reason: e.to_string(),
    })
}
