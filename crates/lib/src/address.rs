use solana_sdk::pubkey::Pubkey;
use std::{fs, path::Path, str::FromStr};

use crate::{error::ReportError, sanitize_error};

/// Splits newline-delimited input into trimmed, non-blank addresses, keeping input order.
pub fn parse_addresses(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the address list. A read failure aborts the whole run.
pub fn read_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ReportError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::IoError(format!(
            "Failed to read address file {}: {}",
            path.display(),
            sanitize_error!(e)
        ))
    })?;

    Ok(parse_addresses(&contents))
}

pub fn parse_wallet(address: &str) -> Result<Pubkey, ReportError> {
    Pubkey::from_str(address).map_err(|e| {
        ReportError::InvalidAddress(format!("{address}: {}", sanitize_error!(e)))
    })
}
