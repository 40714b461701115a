use clap::ValueEnum;

#[derive(Debug, Clone, Default, PartialEq, ValueEnum)]
pub enum LoggingFormat {
    #[default]
    Standard,
    Json,
}

/// Filter used when `RUST_LOG` is not set. HTTP internals are noisy at info.
pub const DEFAULT_LOG_FILTER: &str = "info,reqwest=warn,hyper=warn,hyper_util=warn";
