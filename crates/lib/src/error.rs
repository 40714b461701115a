use crate::sanitize::sanitize_message;
use serde::{Deserialize, Serialize};
use solana_client::client_error::ClientError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum ReportError {
    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    TokenInfoFetchFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ReportError {
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, ReportError::AccountNotFound(_))
    }
}

impl From<ClientError> for ReportError {
    fn from(e: ClientError) -> Self {
        let error_string = e.to_string();
        let message = if cfg!(feature = "unsafe-debug") {
            error_string.clone()
        } else {
            sanitize_message(&error_string)
        };

        if error_string.contains("AccountNotFound")
            || error_string.contains("could not find account")
            || error_string.contains("account not found")
        {
            ReportError::AccountNotFound(message)
        } else {
            ReportError::RpcError(message)
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::IoError(crate::sanitize_error!(e))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::SerializationError(crate::sanitize_error!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::client_error::ClientErrorKind;

    #[test]
    fn test_client_error_account_not_found() {
        let client_error = ClientError::from(ClientErrorKind::Custom(
            "Invalid param: could not find account".to_string(),
        ));
        let error = ReportError::from(client_error);
        assert!(error.is_account_not_found());
    }

    #[test]
    fn test_client_error_other() {
        let client_error = ClientError::from(ClientErrorKind::Custom("connection refused".into()));
        let error = ReportError::from(client_error);
        assert!(matches!(error, ReportError::RpcError(ref msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_client_error_redacts_api_key() {
        let client_error = ClientError::from(ClientErrorKind::Custom(
            "error sending request for url (https://rpc.example.com/?api-key=s3cr3t)".into(),
        ));
        let error = ReportError::from(client_error);
        assert!(!error.to_string().contains("s3cr3t"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "addresses.txt missing");
        let error = ReportError::from(io_error);
        assert_eq!(error, ReportError::IoError("addresses.txt missing".to_string()));
    }

    #[test]
    fn test_token_info_error_display() {
        let error =
            ReportError::TokenInfoFetchFailed("Failed to fetch token info for chain 103".into());
        assert_eq!(error.to_string(), "Failed to fetch token info for chain 103");
    }
}
