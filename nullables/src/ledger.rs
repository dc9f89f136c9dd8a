//! Nullable ledger: canned sequence numbers, fees and simulations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use remit_client::{ClientError, FeeStats, LedgerClient, SimulationResponse};
use remit_types::StellarAddress;

/// Base64 `SorobanTransactionData` of the default simulation: an empty
/// footprint and a resource fee of [`NULL_RESOURCE_FEE`] stroops.
pub const NULL_SOROBAN_DATA: &str = "AAAAAAAAAAAAAAAAAA9CQAAAB9AAAAPoAAAAAAAA40U=";
pub const NULL_RESOURCE_FEE: u32 = 58_181;

/// A call made against a [`NullLedgerClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    AccountSequence(StellarAddress),
    FeeStats,
    Simulate(String),
}

#[derive(Default)]
struct State {
    sequences: HashMap<StellarAddress, i64>,
    fee_stats: Option<FeeStats>,
    fee_stats_error: Option<ClientError>,
    simulation: Option<Result<SimulationResponse, ClientError>>,
    transport_failure: Option<String>,
    calls: Vec<LedgerCall>,
}

/// A ledger that answers from configured state instead of the network.
///
/// Unknown accounts answer `AccountNotFound`. Fee stats default to a flat
/// 100 stroops. Simulation answers [`NullLedgerClient::default_simulation`]
/// unless configured.
#[derive(Default)]
pub struct NullLedgerClient {
    state: Mutex<State>,
}

impl NullLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful simulation that needs no authorization entries.
    pub fn default_simulation() -> SimulationResponse {
        SimulationResponse {
            min_resource_fee: Some(NULL_RESOURCE_FEE.to_string()),
            results: vec![serde_json::json!({ "auth": [], "xdr": "AAAAAQ==" })],
            transaction_data: Some(NULL_SOROBAN_DATA.to_string()),
            error: None,
            latest_ledger: 1,
        }
    }

    /// Builder: register `account` with current sequence `seq`.
    pub fn with_account(self, account: impl Into<StellarAddress>, seq: i64) -> Self {
        self.set_sequence(account, seq);
        self
    }

    pub fn with_fee_stats(self, stats: FeeStats) -> Self {
        self.lock().fee_stats = Some(stats);
        self
    }

    pub fn with_simulation(self, response: SimulationResponse) -> Self {
        self.lock().simulation = Some(Ok(response));
        self
    }

    pub fn with_simulation_error(self, error: ClientError) -> Self {
        self.lock().simulation = Some(Err(error));
        self
    }

    pub fn with_fee_stats_error(self, error: ClientError) -> Self {
        self.lock().fee_stats_error = Some(error);
        self
    }

    /// Every call fails with a transport error until cleared.
    pub fn fail_transport(&self, reason: impl Into<String>) {
        self.lock().transport_failure = Some(reason.into());
    }

    pub fn clear_failure(&self) {
        self.lock().transport_failure = None;
    }

    pub fn set_sequence(&self, account: impl Into<StellarAddress>, seq: i64) {
        self.lock().sequences.insert(account.into(), seq);
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.lock().calls.clone()
    }

    /// Envelopes submitted for simulation.
    pub fn simulated(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                LedgerCall::Simulate(xdr) => Some(xdr.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear all state.
    pub fn reset(&self) {
        *self.lock() = State::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // ignore poisoning
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: LedgerCall) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &state.transport_failure {
            Some(reason) => Err(ClientError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerClient for NullLedgerClient {
    async fn account_sequence(&self, account: &StellarAddress) -> Result<i64, ClientError> {
        self.record(LedgerCall::AccountSequence(account.clone()))?;
        self.lock()
            .sequences
            .get(account)
            .copied()
            .ok_or_else(|| ClientError::AccountNotFound(account.to_string()))
    }

    async fn fee_stats(&self) -> Result<FeeStats, ClientError> {
        self.record(LedgerCall::FeeStats)?;
        let state = self.lock();
        if let Some(err) = &state.fee_stats_error {
            return Err(err.clone());
        }
        Ok(state.fee_stats.clone().unwrap_or_else(|| FeeStats::flat(100)))
    }

    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulationResponse, ClientError> {
        self.record(LedgerCall::Simulate(envelope_xdr.to_string()))?;
        self.lock()
            .simulation
            .clone()
            .unwrap_or_else(|| Ok(Self::default_simulation()))
    }
}
