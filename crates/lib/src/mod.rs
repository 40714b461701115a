pub mod address;
pub mod aggregator;
pub mod airdrop;
pub mod balance;
pub mod batch;
pub mod config;
pub mod constant;
pub mod error;
pub mod log;
pub mod report;
pub mod rpc;
pub mod sanitize;
pub mod token_info;
pub use aggregator::ReportAggregator;
pub use config::Config;
pub use error::ReportError;
pub use report::{AddressResult, Summary};
