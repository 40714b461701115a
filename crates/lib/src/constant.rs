// Networks
pub const DEFAULT_DEVNET_RPC_URL: &str = "https://devnet.sonic.game";
pub const DEFAULT_TESTNET_RPC_URL: &str = "https://api.testnet.v0.sonic.game";
pub const DEFAULT_DEVNET_MINT: &str = "8DihuwAUQ9CAU8U2pQ5Rv7FzpsGaZmbwK9Ln6fStdSeo";
pub const DEFAULT_TESTNET_MINT: &str = "EaVyvc1xw2wsZV3en6HaSx5B3ebuANXfrFekzX7zZzVm";
pub const DEVNET_CHAIN_ID: u64 = 103;
pub const TESTNET_CHAIN_ID: u64 = 102;

// External Services
pub const DEFAULT_TOKEN_LIST_URL: &str = "https://token-list-api.solana.cloud";
pub const TOKEN_LIST_MINTS_PATH: &str = "/v1/mints";
pub const DEFAULT_AIRDROP_URL: &str = "https://airdrop.sonic.game/api/allocations";
pub const DEFAULT_AIRDROP_QUERY_PARAM: &str = "wallet";

// Batching
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 1000;

// Timeouts
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

// Files
pub const DEFAULT_REPORT_PREFIX: &str = "balance";
pub const DEFAULT_ADDRESSES_FILE: &str = "addresses.txt";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
