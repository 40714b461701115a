use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::TokenInfoConfig, constant::TOKEN_LIST_MINTS_PATH, error::ReportError, sanitize_error,
};

#[derive(Serialize)]
struct MintsRequest<'a> {
    addresses: [&'a str; 1],
}

/// Client for the token list API. The response is embedded in the report
/// untouched, so it is returned as raw JSON.
pub struct TokenInfoFetcher {
    client: Client,
    mints_url: String,
}

impl TokenInfoFetcher {
    pub fn new(client: Client, config: &TokenInfoConfig) -> Self {
        let trimmed = config.url.trim_end_matches('/');
        Self { client, mints_url: format!("{trimmed}{TOKEN_LIST_MINTS_PATH}") }
    }

    /// Unlike the balance and airdrop lookups this one fails loudly; the caller
    /// decides what a missing token description means for the address.
    pub async fn fetch(&self, chain_id: u64, mint: &str) -> Result<Value, ReportError> {
        let response = self
            .client
            .post(&self.mints_url)
            .query(&[("chainId", chain_id)])
            .json(&MintsRequest { addresses: [mint] })
            .send()
            .await
            .map_err(|e| {
                ReportError::TokenInfoFetchFailed(format!(
                    "Failed to fetch token info for chain {chain_id}: {}",
                    sanitize_error!(e)
                ))
            })?;

        if !response.status().is_success() {
            log::debug!("Token list API returned {} for chain {chain_id}", response.status());
            return Err(ReportError::TokenInfoFetchFailed(format!(
                "Failed to fetch token info for chain {chain_id}"
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            ReportError::InvalidResponse(format!(
                "Failed to parse token info for chain {chain_id}: {}",
                sanitize_error!(e)
            ))
        })
    }
}
