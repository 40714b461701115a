use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::AirdropConfig, error::ReportError, sanitize_error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationDetail {
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropStatus {
    pub is_eligible: bool,
    pub total_airdrop: f64,
    pub details: Vec<AllocationDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for AirdropStatus {
    fn default() -> Self {
        Self { is_eligible: false, total_airdrop: 0.0, details: vec![], error: None }
    }
}

impl AirdropStatus {
    pub fn from_allocations(details: Vec<AllocationDetail>) -> Self {
        let total_airdrop = details.iter().map(|detail| detail.amount).sum();
        Self { is_eligible: !details.is_empty(), total_airdrop, details, error: None }
    }

    /// An ineligible status that remembers why the check could not be completed.
    pub fn failed(error: &ReportError) -> Self {
        Self { error: Some(error.to_string()), ..Self::default() }
    }
}

/// Allocation amounts arrive as numbers from some deployments and as strings from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn value(&self) -> Result<f64, ReportError> {
        match self {
            Amount::Number(n) => Ok(*n),
            Amount::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ReportError::InvalidResponse(format!("Allocation amount {s:?} is not a number"))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocationRecord {
    #[serde(default)]
    total: Option<Amount>,
    #[serde(default)]
    amount: Option<Amount>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "created_at")]
    created_at: Option<String>,
}

impl TryFrom<AllocationRecord> for AllocationDetail {
    type Error = ReportError;

    fn try_from(record: AllocationRecord) -> Result<Self, Self::Error> {
        let amount = match record.total.as_ref().or(record.amount.as_ref()) {
            Some(amount) => amount.value()?,
            None => 0.0,
        };

        Ok(AllocationDetail {
            amount,
            description: record.description.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            created_at: record.created_at,
        })
    }
}

pub struct AirdropChecker {
    client: Client,
    url: String,
    query_param: String,
}

impl AirdropChecker {
    pub fn new(client: Client, config: &AirdropConfig) -> Self {
        Self { client, url: config.url.clone(), query_param: config.query_param.clone() }
    }

    /// Never fails. Transport, HTTP and decoding problems all yield an
    /// ineligible status with `error` set; an empty list is ineligible without one.
    pub async fn check(&self, address: &str) -> AirdropStatus {
        match self.fetch_allocations(address).await {
            Ok(details) => AirdropStatus::from_allocations(details),
            Err(e) => {
                log::warn!("Airdrop check failed for {address}: {e}");
                AirdropStatus::failed(&e)
            }
        }
    }

    async fn fetch_allocations(&self, address: &str) -> Result<Vec<AllocationDetail>, ReportError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[(self.query_param.as_str(), address)])
            .send()
            .await
            .map_err(|e| {
                ReportError::HttpError(format!("Airdrop API request failed: {}", sanitize_error!(e)))
            })?;

        if !response.status().is_success() {
            return Err(ReportError::HttpError(format!(
                "Airdrop API error: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ReportError::InvalidResponse(format!(
                "Failed to parse airdrop response: {}",
                sanitize_error!(e)
            ))
        })?;

        parse_allocations(body)
    }
}

fn parse_allocations(body: Value) -> Result<Vec<AllocationDetail>, ReportError> {
    let Value::Array(items) = body else {
        return Err(ReportError::InvalidResponse(
            "Invalid response format: expected a list of allocations".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| {
            let record: AllocationRecord = serde_json::from_value(item).map_err(|e| {
                ReportError::InvalidResponse(format!("Invalid allocation record: {e}"))
            })?;
            AllocationDetail::try_from(record)
        })
        .collect()
}
