use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::{airdrop::AirdropStatus, error::ReportError, sanitize_error};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBalance {
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResult {
    pub address: String,
    pub devnet: NetworkBalance,
    pub testnet: NetworkBalance,
    pub total_balance: f64,
    pub airdrop: AirdropStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddressResult {
    pub fn new(
        address: &str,
        devnet: NetworkBalance,
        testnet: NetworkBalance,
        airdrop: AirdropStatus,
    ) -> Self {
        Self {
            address: address.to_string(),
            total_balance: devnet.balance + testnet.balance,
            devnet,
            testnet,
            airdrop,
            error: None,
        }
    }

    /// Zeroed result for an address whose processing failed. It still goes in the report.
    pub fn failed(address: &str, error: &ReportError) -> Self {
        Self {
            address: address.to_string(),
            devnet: NetworkBalance::default(),
            testnet: NetworkBalance::default(),
            total_balance: 0.0,
            airdrop: AirdropStatus::default(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_addresses: usize,
    pub successful_queries: usize,
    pub failed_queries: usize,
    pub grand_total: f64,
    pub total_eligible_airdrops: usize,
    pub total_airdrop_amount: f64,
    pub details: Vec<AddressResult>,
}

impl Summary {
    pub fn from_results(details: Vec<AddressResult>) -> Self {
        let successful_queries = details.iter().filter(|r| r.is_success()).count();

        Self {
            total_addresses: details.len(),
            successful_queries,
            failed_queries: details.len() - successful_queries,
            grand_total: details.iter().map(|r| r.total_balance).sum(),
            total_eligible_airdrops: details.iter().filter(|r| r.airdrop.is_eligible).count(),
            total_airdrop_amount: details.iter().map(|r| r.airdrop.total_airdrop).sum(),
            details,
        }
    }
}

/// `<prefix>-report-<ISO 8601 timestamp>.json` with `:` and `.` replaced so
/// the name is valid on every filesystem.
pub fn report_file_name(prefix: &str, timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true).replace([':', '.'], "-");
    format!("{prefix}-report-{stamp}.json")
}

/// Writes the summary as indented JSON. Failure here aborts the run.
pub fn write_report<P: AsRef<Path>>(
    output_dir: P,
    prefix: &str,
    summary: &Summary,
) -> Result<PathBuf, ReportError> {
    let path = output_dir.as_ref().join(report_file_name(prefix, Utc::now()));
    let json = serde_json::to_string_pretty(summary)?;

    fs::write(&path, json).map_err(|e| {
        ReportError::IoError(format!(
            "Failed to write report to {}: {}",
            path.display(),
            sanitize_error!(e)
        ))
    })?;

    log::info!("Report written to {}", path.display());
    Ok(path)
}

/// Console rendering of a finished run.
pub struct SummaryView<'a> {
    pub summary: &'a Summary,
    pub report_path: &'a Path,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "\n{}", "📊 Sonic SVM Devnet + Testnet Balance Summary".bold())?;
        writeln!(f, "{}", "================".dimmed())?;
        writeln!(
            f,
            "{}",
            format!("📫 Total Addresses: {}", summary.total_addresses.to_string().yellow()).blue()
        )?;
        writeln!(
            f,
            "{}",
            format!("✅ Successful Queries: {}", summary.successful_queries.to_string().yellow())
                .green()
        )?;
        writeln!(
            f,
            "{}",
            format!("❌ Failed Queries: {}", summary.failed_queries.to_string().yellow()).red()
        )?;
        writeln!(
            f,
            "{}",
            format!("💰 Grand Total Balance: {}", format_amount(summary.grand_total).yellow())
                .magenta()
        )?;
        writeln!(
            f,
            "{}",
            format!(
                "🎁 Eligible for Airdrop: {} ({} total)",
                summary.total_eligible_airdrops.to_string().yellow(),
                format_amount(summary.total_airdrop_amount).yellow()
            )
            .cyan()
        )?;
        writeln!(
            f,
            "{}",
            format!("\n💾 Report saved to: {}", self.report_path.display().to_string().cyan())
                .dimmed()
        )?;

        writeln!(f, "\n{}", "📝 Individual Balances".bold())?;
        writeln!(f, "{}", "===================".dimmed())?;

        for result in &summary.details {
            if let Some(error) = &result.error {
                writeln!(f, "{}", format!("{}: Error - {error}", result.address).red())?;
                continue;
            }

            let airdrop = if result.airdrop.is_eligible {
                format!("Airdrop={}", format_amount(result.airdrop.total_airdrop)).green()
            } else {
                "Airdrop=not eligible".dimmed()
            };

            writeln!(
                f,
                "{}: Total={} ({}, {}) {airdrop}",
                result.address.cyan(),
                format_amount(result.total_balance).yellow(),
                format!("Devnet={}", format_amount(result.devnet.balance)).green(),
                format!("Testnet={}", format_amount(result.testnet.balance)).blue(),
            )?;

            for detail in &result.airdrop.details {
                writeln!(
                    f,
                    "    {} {} [{}] {}",
                    "↳".dimmed(),
                    format_amount(detail.amount).yellow(),
                    detail.category,
                    detail.description
                )?;
            }
        }

        Ok(())
    }
}

pub fn render_summary(summary: &Summary, report_path: &Path) -> String {
    SummaryView { summary, report_path }.to_string()
}

/// Groups the integer part in thousands and keeps at most four decimals.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.4}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = fraction.is_empty() && integer.chars().all(|c| c == '0');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
