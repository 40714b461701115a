use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::{
    constant::{
        DEFAULT_AIRDROP_QUERY_PARAM, DEFAULT_AIRDROP_URL, DEFAULT_BATCH_PAUSE_MS,
        DEFAULT_BATCH_SIZE, DEFAULT_DEVNET_MINT, DEFAULT_DEVNET_RPC_URL, DEFAULT_HTTP_TIMEOUT_SECS,
        DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_PREFIX, DEFAULT_RPC_TIMEOUT_SECS, DEFAULT_TESTNET_MINT,
        DEFAULT_TESTNET_RPC_URL, DEFAULT_TOKEN_LIST_URL, DEVNET_CHAIN_ID, TESTNET_CHAIN_ID,
    },
    error::ReportError,
    sanitize_error,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub networks: NetworksConfig,
    #[serde(default)]
    pub airdrop: AirdropConfig,
    #[serde(default)]
    pub token_info: TokenInfoConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworksConfig {
    #[serde(default = "NetworkConfig::devnet")]
    pub devnet: NetworkConfig,
    #[serde(default = "NetworkConfig::testnet")]
    pub testnet: NetworkConfig,
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self { devnet: NetworkConfig::devnet(), testnet: NetworkConfig::testnet() }
    }
}

/// One SVM network: where to query, which mint to look for, and the chain id
/// the token list API knows it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub mint: String,
    pub chain_id: u64,
}

impl NetworkConfig {
    pub fn devnet() -> Self {
        Self {
            rpc_url: DEFAULT_DEVNET_RPC_URL.to_string(),
            mint: DEFAULT_DEVNET_MINT.to_string(),
            chain_id: DEVNET_CHAIN_ID,
        }
    }

    pub fn testnet() -> Self {
        Self {
            rpc_url: DEFAULT_TESTNET_RPC_URL.to_string(),
            mint: DEFAULT_TESTNET_MINT.to_string(),
            chain_id: TESTNET_CHAIN_ID,
        }
    }

    pub fn mint_pubkey(&self) -> Result<Pubkey, ReportError> {
        Pubkey::from_str(&self.mint).map_err(|e| {
            ReportError::ConfigError(format!("Invalid mint {}: {}", self.mint, sanitize_error!(e)))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropConfig {
    pub url: String,
    #[serde(default = "default_airdrop_query_param")]
    pub query_param: String,
}

fn default_airdrop_query_param() -> String {
    DEFAULT_AIRDROP_QUERY_PARAM.to_string()
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self { url: DEFAULT_AIRDROP_URL.to_string(), query_param: default_airdrop_query_param() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfoConfig {
    pub url: String,
}

impl Default for TokenInfoConfig {
    fn default() -> Self {
        Self { url: DEFAULT_TOKEN_LIST_URL.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub size: usize,
    pub pause_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { size: DEFAULT_BATCH_SIZE, pause_ms: DEFAULT_BATCH_PAUSE_MS }
    }
}

impl BatchConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub rpc_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub prefix: String,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_REPORT_PREFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ReportError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ReportError::ConfigError(format!("Failed to read config file: {}", sanitize_error!(e)))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ReportError::ConfigError(format!("Failed to parse config file: {}", sanitize_error!(e)))
        })
    }

    /// Loads the file when a path is given, otherwise falls back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ReportError> {
        match path {
            Some(path) => Self::load_config(path),
            None => Ok(Config::default()),
        }
    }

    /// Collects every problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, network) in [("devnet", &self.networks.devnet), ("testnet", &self.networks.testnet)]
        {
            if let Err(e) = network.mint_pubkey() {
                errors.push(format!("networks.{name}.mint: {e}"));
            }
            if !is_http_url(&network.rpc_url) {
                errors.push(format!("networks.{name}.rpc_url must be an http(s) URL"));
            }
        }

        if !is_http_url(&self.airdrop.url) {
            errors.push("airdrop.url must be an http(s) URL".to_string());
        }
        if self.airdrop.query_param.trim().is_empty() {
            errors.push("airdrop.query_param must not be empty".to_string());
        }
        if !is_http_url(&self.token_info.url) {
            errors.push("token_info.url must be an http(s) URL".to_string());
        }
        if self.batch.size == 0 {
            errors.push("batch.size must be greater than 0".to_string());
        }
        if self.http.timeout_secs == 0 || self.http.rpc_timeout_secs == 0 {
            errors.push("http timeouts must be greater than 0".to_string());
        }
        if self.report.prefix.trim().is_empty() {
            errors.push("report.prefix must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://")) && !url.ends_with("://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = Config::default();
        assert_eq!(config.networks.devnet.rpc_url, DEFAULT_DEVNET_RPC_URL);
        assert_eq!(config.networks.testnet.mint, DEFAULT_TESTNET_MINT);
        assert_eq!(config.networks.devnet.chain_id, 103);
        assert_eq!(config.networks.testnet.chain_id, 102);
        assert_eq!(config.batch.size, 5);
        assert_eq!(config.batch.pause(), Duration::from_secs(1));
        assert_eq!(config.report.prefix, "balance");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let file = write_toml(
            r#"
            [batch]
            size = 2
            pause_ms = 10

            [networks.devnet]
            rpc_url = "http://127.0.0.1:8899"
            mint = "8DihuwAUQ9CAU8U2pQ5Rv7FzpsGaZmbwK9Ln6fStdSeo"
            chain_id = 103
            "#,
        );

        let config = Config::load_config(file.path()).unwrap();
        assert_eq!(config.batch, BatchConfig { size: 2, pause_ms: 10 });
        assert_eq!(config.networks.devnet.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.networks.testnet, NetworkConfig::testnet());
        assert_eq!(config.airdrop, AirdropConfig::default());
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_load_empty_config() {
        let file = write_toml("");
        assert_eq!(Config::load_config(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_toml("[batch\nsize = ");
        let result = Config::load_config(file.path());
        assert!(matches!(result, Err(ReportError::ConfigError(ref msg)) if msg.contains("parse")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load_config("/nonexistent/sonic-ring.toml");
        assert!(matches!(result, Err(ReportError::ConfigError(ref msg)) if msg.contains("read")));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None::<&str>).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.networks.devnet.mint = "not-a-mint".to_string();
        config.airdrop.url = "ftp://example.com".to_string();
        config.batch.size = 0;
        config.report.prefix = " ".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("networks.devnet.mint"));
        assert!(errors.iter().any(|e| e.contains("batch.size")));
    }
}
