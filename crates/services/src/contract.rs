use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

//
// ─── GATEWAY CONTRACT ──────────────────────────────────────────────────────────
//

/// Errors surfaced by a contract gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("contract call failed: {0}")]
    Call(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// Result of a submitted mint transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: String,
    pub confirmed: bool,
}

/// Capability interface over the mint contract.
///
/// The wallet-connector library behind this seam is an external
/// collaborator; services only depend on these five calls. The four reads
/// mirror the contract's public queries, `mint` is the single
/// state-changing call.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Tokens already minted by the address.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the read call fails.
    async fn minted_count(&self, address: &str) -> Result<u64, GatewayError>;

    /// Mints still allowed for the address under the per-address cap.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the read call fails.
    async fn remaining_mints_for(&self, address: &str) -> Result<u64, GatewayError>;

    /// Tokens minted so far across all addresses.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the read call fails.
    async fn total_supply(&self) -> Result<u64, GatewayError>;

    /// Tokens still available to mint.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the read call fails.
    async fn remaining_supply(&self) -> Result<u64, GatewayError>;

    /// Submit a mint for the address and wait for the confirmation signal.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Rejected` if the transaction is rejected or
    /// reverted.
    async fn mint(&self, address: &str) -> Result<MintReceipt, GatewayError>;
}

//
// ─── SCRIPTED GATEWAY ──────────────────────────────────────────────────────────
//

#[derive(Debug)]
struct ScriptedState {
    minted_by: HashMap<String, u64>,
    minted_total: u64,
    reject_next: Option<String>,
    tx_counter: u64,
}

/// Deterministic in-memory gateway for tests and offline prototyping.
///
/// Models the shipped contract's rules: a fixed maximum supply and a fixed
/// per-address mint cap. A scripted rejection can be queued to exercise the
/// failure path.
#[derive(Clone)]
pub struct ScriptedGateway {
    max_supply: u64,
    per_address_cap: u64,
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedGateway {
    /// Gateway with the given supply limit and per-address cap.
    #[must_use]
    pub fn new(max_supply: u64, per_address_cap: u64) -> Self {
        Self {
            max_supply,
            per_address_cap,
            state: Arc::new(Mutex::new(ScriptedState {
                minted_by: HashMap::new(),
                minted_total: 0,
                reject_next: None,
                tx_counter: 0,
            })),
        }
    }

    /// The shipped configuration: 10 000 tokens, 3 per address.
    #[must_use]
    pub fn default_contract() -> Self {
        Self::new(10_000, 3)
    }

    /// Queue a rejection for the next `mint` call.
    pub fn reject_next_mint(&self, reason: impl Into<String>) {
        self.lock().reject_next = Some(reason.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ContractGateway for ScriptedGateway {
    async fn minted_count(&self, address: &str) -> Result<u64, GatewayError> {
        Ok(self.lock().minted_by.get(address).copied().unwrap_or(0))
    }

    async fn remaining_mints_for(&self, address: &str) -> Result<u64, GatewayError> {
        let minted = self.lock().minted_by.get(address).copied().unwrap_or(0);
        Ok(self.per_address_cap.saturating_sub(minted))
    }

    async fn total_supply(&self) -> Result<u64, GatewayError> {
        Ok(self.lock().minted_total)
    }

    async fn remaining_supply(&self) -> Result<u64, GatewayError> {
        let minted = self.lock().minted_total;
        Ok(self.max_supply.saturating_sub(minted))
    }

    async fn mint(&self, address: &str) -> Result<MintReceipt, GatewayError> {
        let mut state = self.lock();

        if let Some(reason) = state.reject_next.take() {
            return Err(GatewayError::Rejected(reason));
        }
        if state.minted_total >= self.max_supply {
            return Err(GatewayError::Rejected("supply exhausted".into()));
        }
        let minted = state.minted_by.get(address).copied().unwrap_or(0);
        if minted >= self.per_address_cap {
            return Err(GatewayError::Rejected("per-address cap reached".into()));
        }

        state.minted_by.insert(address.to_owned(), minted + 1);
        state.minted_total += 1;
        state.tx_counter += 1;
        Ok(MintReceipt {
            tx_hash: format!("0x{:064x}", state.tx_counter),
            confirmed: true,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
