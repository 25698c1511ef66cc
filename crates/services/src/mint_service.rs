use std::sync::Arc;

use crate::contract::{ContractGateway, MintReceipt};
use crate::error::MintError;
use tutorial_core::model::{MintStatus, NetworkConfig, WalletStatus};

/// Mint eligibility and execution over a [`ContractGateway`].
///
/// The wallet layer owns connection UI and error display; the only decision
/// this service exports to it is whether minting is currently allowed.
/// Wallet or network problems therefore withhold eligibility rather than
/// panic or retry.
#[derive(Clone)]
pub struct MintService {
    config: NetworkConfig,
    gateway: Arc<dyn ContractGateway>,
}

impl MintService {
    #[must_use]
    pub fn new(config: NetworkConfig, gateway: Arc<dyn ContractGateway>) -> Self {
        Self { config, gateway }
    }

    #[must_use]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Current mint counters for the wallet.
    ///
    /// Global supply reads always run; the per-address counters are zero
    /// while no wallet is connected, matching the contract queries being
    /// disabled without an address.
    ///
    /// # Errors
    ///
    /// Returns `MintError::Gateway` if any contract read fails.
    pub async fn status(&self, wallet: &WalletStatus) -> Result<MintStatus, MintError> {
        let total_supply = self.gateway.total_supply().await?;
        let remaining_supply = self.gateway.remaining_supply().await?;

        let (minted_count, remaining_mints) = match wallet.address.as_deref() {
            Some(address) => (
                self.gateway.minted_count(address).await?,
                self.gateway.remaining_mints_for(address).await?,
            ),
            None => (0, 0),
        };

        Ok(MintStatus {
            minted_count,
            remaining_mints,
            total_supply,
            remaining_supply,
        })
    }

    /// The eligibility decision exported to the wallet UI. Any gateway
    /// failure withholds eligibility instead of surfacing an error.
    pub async fn can_mint(&self, wallet: &WalletStatus) -> bool {
        match self.status(wallet).await {
            Ok(status) => status.can_mint(wallet.is_connected()),
            Err(_) => false,
        }
    }

    /// Submit a mint for the connected wallet.
    ///
    /// Preconditions are checked in order: connection, expected network,
    /// per-address allowance, remaining supply. Only then is the single
    /// state-changing gateway call issued.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition as a typed `MintError`, or
    /// `MintError::Gateway` if the transaction is rejected.
    pub async fn mint(&self, wallet: &WalletStatus) -> Result<MintReceipt, MintError> {
        let address = wallet.address.as_deref().ok_or(MintError::NotConnected)?;

        let expected = self.config.chain_id();
        if wallet.chain_id != Some(expected) {
            return Err(MintError::WrongNetwork {
                expected,
                actual: wallet.chain_id,
            });
        }

        let status = self.status(wallet).await?;
        if status.remaining_mints == 0 {
            return Err(MintError::MintLimitReached);
        }
        if status.remaining_supply == 0 {
            return Err(MintError::SoldOut);
        }

        let receipt = self.gateway.mint(address).await?;
        Ok(receipt)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ScriptedGateway;
    use tutorial_core::model::NetworkConfigDraft;

    const ADDRESS: &str = "0x8E842cA7AFa67d65C19B564D23fBB764F480227C";

    fn config() -> NetworkConfig {
        NetworkConfigDraft {
            chain_id: 1270,
            chain_name: "Irys Testnet".to_owned(),
            rpc_url: "https://testnet-rpc.irys.xyz/v1/execution-rpc".to_owned(),
            contract_address: ADDRESS.to_owned(),
        }
        .validate()
        .unwrap()
    }

    fn service(gateway: ScriptedGateway) -> MintService {
        MintService::new(config(), Arc::new(gateway))
    }

    #[tokio::test]
    async fn disconnected_wallet_cannot_mint() {
        let service = service(ScriptedGateway::default_contract());
        let wallet = WalletStatus::disconnected();

        assert!(!service.can_mint(&wallet).await);
        let err = service.mint(&wallet).await.unwrap_err();
        assert!(matches!(err, MintError::NotConnected));
    }

    #[tokio::test]
    async fn wrong_network_is_rejected_before_any_write() {
        let service = service(ScriptedGateway::default_contract());
        let wallet = WalletStatus::connected(ADDRESS, 1);

        let err = service.mint(&wallet).await.unwrap_err();
        assert!(matches!(
            err,
            MintError::WrongNetwork {
                expected: 1270,
                actual: Some(1)
            }
        ));
        assert_eq!(service.status(&wallet).await.unwrap().total_supply, 0);
    }

    #[tokio::test]
    async fn mint_succeeds_and_updates_counters() {
        let service = service(ScriptedGateway::default_contract());
        let wallet = WalletStatus::connected(ADDRESS, 1270);

        assert!(service.can_mint(&wallet).await);
        let receipt = service.mint(&wallet).await.unwrap();
        assert!(receipt.confirmed);

        let status = service.status(&wallet).await.unwrap();
        assert_eq!(status.minted_count, 1);
        assert_eq!(status.remaining_mints, 2);
        assert_eq!(status.total_supply, 1);
    }

    #[tokio::test]
    async fn per_address_cap_exhaustion_stops_minting() {
        let service = service(ScriptedGateway::new(10_000, 1));
        let wallet = WalletStatus::connected(ADDRESS, 1270);

        service.mint(&wallet).await.unwrap();
        assert!(!service.can_mint(&wallet).await);
        let err = service.mint(&wallet).await.unwrap_err();
        assert!(matches!(err, MintError::MintLimitReached));
    }

    #[tokio::test]
    async fn sold_out_contract_stops_minting() {
        let gateway = ScriptedGateway::new(1, 3);
        gateway.mint("0xsomeoneelse").await.unwrap();
        let service = service(gateway);
        let wallet = WalletStatus::connected(ADDRESS, 1270);

        assert!(!service.can_mint(&wallet).await);
        let err = service.mint(&wallet).await.unwrap_err();
        assert!(matches!(err, MintError::SoldOut));
    }

    #[tokio::test]
    async fn rejected_transaction_surfaces_as_gateway_error() {
        let gateway = ScriptedGateway::default_contract();
        gateway.reject_next_mint("user denied signature");
        let service = service(gateway);
        let wallet = WalletStatus::connected(ADDRESS, 1270);

        let err = service.mint(&wallet).await.unwrap_err();
        assert!(matches!(err, MintError::Gateway(_)));
    }
}
