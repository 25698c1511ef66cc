use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NetworkConfigError {
    #[error("chain id must be > 0")]
    InvalidChainId,

    #[error("invalid RPC endpoint URL")]
    InvalidRpcUrl,

    #[error("contract address must be 0x followed by 40 hex characters")]
    InvalidContractAddress,
}

//
// ─── NETWORK CONFIG ────────────────────────────────────────────────────────────
//

/// Unvalidated network settings, as read from configuration.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfigDraft {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub contract_address: String,
}

impl NetworkConfigDraft {
    /// Validate and normalize the draft into a usable config.
    ///
    /// # Errors
    ///
    /// Returns `NetworkConfigError` if the chain id is zero, the RPC URL
    /// does not parse, or the contract address is malformed.
    pub fn validate(self) -> Result<NetworkConfig, NetworkConfigError> {
        if self.chain_id == 0 {
            return Err(NetworkConfigError::InvalidChainId);
        }
        let rpc_url = Url::parse(self.rpc_url.trim())
            .map_err(|_| NetworkConfigError::InvalidRpcUrl)?;

        let address = self.contract_address.trim();
        if !is_hex_address(address) {
            return Err(NetworkConfigError::InvalidContractAddress);
        }

        Ok(NetworkConfig {
            chain_id: self.chain_id,
            chain_name: self.chain_name,
            rpc_url,
            contract_address: address.to_owned(),
        })
    }
}

/// Validated description of the expected network and mint contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    chain_id: u64,
    chain_name: String,
    rpc_url: Url,
    contract_address: String,
}

impl NetworkConfig {
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[must_use]
    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    #[must_use]
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    #[must_use]
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }
}

fn is_hex_address(s: &str) -> bool {
    let Some(hex) = s.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

//
// ─── WALLET & MINT STATE ───────────────────────────────────────────────────────
//

/// Connection snapshot reported by the wallet collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletStatus {
    pub address: Option<String>,
    pub chain_id: Option<u64>,
}

impl WalletStatus {
    /// A wallet connected on the given chain.
    #[must_use]
    pub fn connected(address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            address: Some(address.into()),
            chain_id: Some(chain_id),
        }
    }

    /// No wallet connected.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Read-only mint counters for one address, as reported by the contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MintStatus {
    pub minted_count: u64,
    pub remaining_mints: u64,
    pub total_supply: u64,
    pub remaining_supply: u64,
}

impl MintStatus {
    /// The single eligibility decision exported to the wallet UI:
    /// connected, with per-address allowance and global supply left.
    #[must_use]
    pub fn can_mint(&self, connected: bool) -> bool {
        connected && self.remaining_mints > 0 && self.remaining_supply > 0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
