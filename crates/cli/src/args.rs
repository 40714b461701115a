use clap::Parser;
use sonic_ring_lib::log::LoggingFormat;
use std::path::PathBuf;

/// Global arguments used by all subcommands
#[derive(Debug, Parser)]
#[command(name = "sonic-ring")]
pub struct GlobalArgs {
    /// Path to configuration file (TOML format); built-in defaults are used when omitted
    #[arg(long, env = "SONIC_RING_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Devnet RPC endpoint URL (overrides the config file)
    #[arg(long, env = "DEVNET_RPC_URL", global = true)]
    pub devnet_rpc_url: Option<String>,

    /// Testnet RPC endpoint URL (overrides the config file)
    #[arg(long, env = "TESTNET_RPC_URL", global = true)]
    pub testnet_rpc_url: Option<String>,

    /// Airdrop allocation API URL (overrides the config file)
    #[arg(long, env = "AIRDROP_API_URL", global = true)]
    pub airdrop_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LoggingFormat::Standard, global = true)]
    pub logging_format: LoggingFormat,
}

/// Arguments for a full report run
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Newline-delimited file of wallet addresses
    #[arg(long, default_value = sonic_ring_lib::constant::DEFAULT_ADDRESSES_FILE)]
    pub addresses: PathBuf,

    /// Directory the JSON report is written to (overrides the config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            addresses: PathBuf::from(sonic_ring_lib::constant::DEFAULT_ADDRESSES_FILE),
            output_dir: None,
        }
    }
}
