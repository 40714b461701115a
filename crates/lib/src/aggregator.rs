use reqwest::Client;
use std::{path::Path, time::Duration};

use crate::{
    address::{parse_wallet, read_addresses},
    airdrop::AirdropChecker,
    balance::{BalanceFetcher, Network},
    batch::process_in_batches,
    config::{BatchConfig, Config},
    error::ReportError,
    report::{AddressResult, NetworkBalance, Summary},
    rpc::get_rpc_client,
    sanitize_error,
    token_info::TokenInfoFetcher,
};

/// A network's balance fetcher together with the chain id its token metadata lives under.
pub struct NetworkLookup {
    pub balances: BalanceFetcher,
    pub chain_id: u64,
}

pub struct ReportAggregator {
    devnet: NetworkLookup,
    testnet: NetworkLookup,
    airdrop: AirdropChecker,
    token_info: TokenInfoFetcher,
    batch_size: usize,
    batch_pause: Duration,
}

impl ReportAggregator {
    pub fn new(
        devnet: NetworkLookup,
        testnet: NetworkLookup,
        airdrop: AirdropChecker,
        token_info: TokenInfoFetcher,
        batch: &BatchConfig,
    ) -> Self {
        Self {
            devnet,
            testnet,
            airdrop,
            token_info,
            batch_size: batch.size,
            batch_pause: batch.pause(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ReportError> {
        let http_client = Client::builder().timeout(config.http.timeout()).build().map_err(|e| {
            ReportError::ConfigError(format!("Failed to build HTTP client: {}", sanitize_error!(e)))
        })?;

        let devnet_config = &config.networks.devnet;
        let testnet_config = &config.networks.testnet;

        let devnet = NetworkLookup {
            balances: BalanceFetcher::new(
                Network::Devnet,
                devnet_config.mint_pubkey()?,
                get_rpc_client(&devnet_config.rpc_url, config.http.rpc_timeout()),
            ),
            chain_id: devnet_config.chain_id,
        };
        let testnet = NetworkLookup {
            balances: BalanceFetcher::new(
                Network::Testnet,
                testnet_config.mint_pubkey()?,
                get_rpc_client(&testnet_config.rpc_url, config.http.rpc_timeout()),
            ),
            chain_id: testnet_config.chain_id,
        };

        Ok(Self::new(
            devnet,
            testnet,
            AirdropChecker::new(http_client.clone(), &config.airdrop),
            TokenInfoFetcher::new(http_client, &config.token_info),
            &config.batch,
        ))
    }

    /// Builds the result for one address. Failures are folded into the result
    /// so a single bad address never stops the run.
    pub async fn process_address(&self, address: &str) -> AddressResult {
        match self.try_process_address(address).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Error calculating total balance for {address}: {e}");
                AddressResult::failed(address, &e)
            }
        }
    }

    async fn try_process_address(&self, address: &str) -> Result<AddressResult, ReportError> {
        let wallet = parse_wallet(address)?;

        let devnet_balance = self.devnet.balances.fetch(&wallet).await;
        let testnet_balance = self.testnet.balances.fetch(&wallet).await;

        let airdrop = self.airdrop.check(address).await;

        let devnet_mint = self.devnet.balances.mint().to_string();
        let testnet_mint = self.testnet.balances.mint().to_string();
        let devnet_info = self.token_info.fetch(self.devnet.chain_id, &devnet_mint).await?;
        let testnet_info = self.token_info.fetch(self.testnet.chain_id, &testnet_mint).await?;

        Ok(AddressResult::new(
            address,
            NetworkBalance { balance: devnet_balance.ui_amount(), token_info: Some(devnet_info) },
            NetworkBalance { balance: testnet_balance.ui_amount(), token_info: Some(testnet_info) },
            airdrop,
        ))
    }

    pub async fn process_addresses(&self, addresses: &[String]) -> Vec<AddressResult> {
        let outcome =
            process_in_batches(addresses, self.batch_size, self.batch_pause, |address: String| {
                async move { self.process_address(&address).await }
            })
            .await;

        log::debug!("Processed {} batches with {} pauses", outcome.batches, outcome.pauses);
        outcome.results
    }

    /// Reads the address file and processes every address. Only an unreadable
    /// address file makes this fail.
    pub async fn run<P: AsRef<Path>>(&self, addresses_path: P) -> Result<Summary, ReportError> {
        let addresses = read_addresses(addresses_path)?;

        if addresses.is_empty() {
            log::warn!("Address file contains no addresses");
        } else {
            log::info!("Processing {} addresses...", addresses.len());
        }

        let results = self.process_addresses(&addresses).await;
        Ok(Summary::from_results(results))
    }
}
