use mockall::automock;
use serde::{Deserialize, Serialize};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_interface::address::get_associated_token_address;
use std::{fmt, sync::Arc};

use crate::error::ReportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Raw base-unit amount, kept as a string like the RPC returns it
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: f64,
}

/// Outcome of a single balance query. Both arms are a balance to the caller;
/// `Unavailable` keeps the reason for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceLookup {
    Found(TokenBalance),
    Unavailable { reason: String },
}

impl BalanceLookup {
    pub fn ui_amount(&self) -> f64 {
        match self {
            BalanceLookup::Found(balance) => balance.ui_amount,
            BalanceLookup::Unavailable { .. } => 0.0,
        }
    }
}

#[automock]
#[async_trait::async_trait]
pub trait TokenAccountSource {
    async fn token_account_balance(&self, token_account: &Pubkey)
        -> Result<TokenBalance, ReportError>;
}

#[async_trait::async_trait]
impl TokenAccountSource for RpcClient {
    async fn token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<TokenBalance, ReportError> {
        let ui_token_amount = self.get_token_account_balance(token_account).await?;

        let ui_amount = ui_token_amount
            .ui_amount
            .or_else(|| ui_token_amount.ui_amount_string.parse::<f64>().ok())
            .unwrap_or(0.0);

        Ok(TokenBalance {
            amount: ui_token_amount.amount,
            decimals: ui_token_amount.decimals,
            ui_amount,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "devnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Looks up the balance a wallet holds of one mint on one network.
pub struct BalanceFetcher {
    network: Network,
    mint: Pubkey,
    source: Arc<dyn TokenAccountSource + Send + Sync>,
}

impl BalanceFetcher {
    pub fn new(
        network: Network,
        mint: Pubkey,
        source: Arc<dyn TokenAccountSource + Send + Sync>,
    ) -> Self {
        Self { network, mint, source }
    }

    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    /// Never fails: a wallet without a token account is the common case and
    /// resolves to a zero balance, as does any RPC error.
    pub async fn fetch(&self, owner: &Pubkey) -> BalanceLookup {
        let token_account = get_associated_token_address(owner, &self.mint);

        match self.source.token_account_balance(&token_account).await {
            Ok(balance) => BalanceLookup::Found(balance),
            Err(e) => {
                let reason = if e.is_account_not_found() {
                    "No token account found".to_string()
                } else {
                    e.to_string()
                };
                log::info!("{} {}: {}", self.network, owner, reason);
                BalanceLookup::Unavailable { reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rpc::get_rpc_client,
        tests::rpc_mock::{mock_rpc_error, RpcMockBuilder},
    };
    use mockall::predicate::eq;
    use std::time::Duration;

    fn fetcher_with(source: MockTokenAccountSource, mint: Pubkey) -> BalanceFetcher {
        BalanceFetcher::new(Network::Devnet, mint, Arc::new(source))
    }

    #[tokio::test]
    async fn test_fetch_queries_associated_token_account() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let expected_ata = get_associated_token_address(&owner, &mint);

        let mut source = MockTokenAccountSource::new();
        source.expect_token_account_balance().with(eq(expected_ata)).times(1).returning(|_| {
            Ok(TokenBalance {
                amount: "2500000000".to_string(),
                decimals: 9,
                ui_amount: 2.5,
            })
        });

        let lookup = fetcher_with(source, mint).fetch(&owner).await;
        assert_eq!(lookup.ui_amount(), 2.5);
        assert!(matches!(lookup, BalanceLookup::Found(ref balance) if balance.amount == "2500000000"));
    }

    #[tokio::test]
    async fn test_fetch_account_not_found_is_zero() {
        let mut source = MockTokenAccountSource::new();
        source.expect_token_account_balance().returning(|account| {
            Err(ReportError::AccountNotFound(account.to_string()))
        });

        let lookup = fetcher_with(source, Pubkey::new_unique()).fetch(&Pubkey::new_unique()).await;
        assert_eq!(
            lookup,
            BalanceLookup::Unavailable { reason: "No token account found".to_string() }
        );
        assert_eq!(lookup.ui_amount(), 0.0);
    }

    #[tokio::test]
    async fn test_fetch_rpc_error_is_zero() {
        let mut source = MockTokenAccountSource::new();
        source
            .expect_token_account_balance()
            .returning(|_| Err(ReportError::RpcError("503 Service Unavailable".to_string())));

        let lookup = fetcher_with(source, Pubkey::new_unique()).fetch(&Pubkey::new_unique()).await;
        assert_eq!(lookup.ui_amount(), 0.0);
        assert!(matches!(lookup, BalanceLookup::Unavailable { ref reason } if reason.contains("503")));
    }

    #[tokio::test]
    async fn test_rpc_client_token_account_balance() {
        let rpc_client = RpcMockBuilder::new().with_token_balance("1500000", 6, Some(1.5)).build();

        let balance = rpc_client.token_account_balance(&Pubkey::new_unique()).await.unwrap();
        assert_eq!(
            balance,
            TokenBalance { amount: "1500000".to_string(), decimals: 6, ui_amount: 1.5 }
        );
    }

    #[tokio::test]
    async fn test_rpc_client_missing_ui_amount_uses_string() {
        let rpc_client = RpcMockBuilder::new().with_token_balance("1500000", 6, None).build();

        let balance = rpc_client.token_account_balance(&Pubkey::new_unique()).await.unwrap();
        assert_eq!(balance.ui_amount, 1.5);
    }

    #[tokio::test]
    async fn test_fetch_with_failing_rpc_client_is_zero() {
        let rpc_client = RpcMockBuilder::new().with_token_balance_error().build();
        let fetcher = BalanceFetcher::new(Network::Testnet, Pubkey::new_unique(), rpc_client);

        let lookup = fetcher.fetch(&Pubkey::new_unique()).await;
        assert!(matches!(lookup, BalanceLookup::Unavailable { .. }));
        assert_eq!(lookup.ui_amount(), 0.0);
    }

    #[tokio::test]
    async fn test_fetch_rpc_could_not_find_account_is_zero() {
        let mut server = mockito::Server::new_async().await;
        let _m = mock_rpc_error(&mut server, -32602, "Invalid param: could not find account").await;

        let rpc_client = get_rpc_client(&server.url(), Duration::from_secs(5));
        let fetcher = BalanceFetcher::new(Network::Devnet, Pubkey::new_unique(), rpc_client);

        let lookup = fetcher.fetch(&Pubkey::new_unique()).await;
        assert_eq!(
            lookup,
            BalanceLookup::Unavailable { reason: "No token account found".to_string() }
        );
        assert_eq!(lookup.ui_amount(), 0.0);
    }

    #[tokio::test]
    async fn test_rpc_client_could_not_find_account_maps_to_account_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = mock_rpc_error(&mut server, -32602, "Invalid param: could not find account").await;

        let rpc_client = get_rpc_client(&server.url(), Duration::from_secs(5));
        let result = rpc_client.token_account_balance(&Pubkey::new_unique()).await;
        assert!(matches!(result, Err(ref e) if e.is_account_not_found()));
    }

    #[tokio::test]
    async fn test_rpc_client_other_rpc_error_is_not_account_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = mock_rpc_error(&mut server, -32603, "Internal error: ledger unavailable").await;

        let rpc_client = get_rpc_client(&server.url(), Duration::from_secs(5));
        let result = rpc_client.token_account_balance(&Pubkey::new_unique()).await;
        assert!(matches!(result, Err(ReportError::RpcError(ref msg)) if msg.contains("ledger unavailable")));
    }
}
