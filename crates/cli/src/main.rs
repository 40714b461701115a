mod args;

use args::{GlobalArgs, ReportArgs};
use clap::{Parser, Subcommand};
use sonic_ring_lib::{
    log::{LoggingFormat, DEFAULT_LOG_FILTER},
    report::{render_summary, write_report},
    Config, ReportAggregator, ReportError,
};

#[derive(Subcommand)]
enum Commands {
    /// Query every address in the address file and write a JSON report (default)
    Report {
        #[command(flatten)]
        report_args: ReportArgs,
    },
    /// Query a single address and print its result as JSON
    Check {
        /// Wallet address to inspect
        address: String,
    },
    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate configuration file (no network calls)
    Validate,
    /// Print the effective configuration as TOML
    Show,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sonic SVM devnet + testnet ring balance and airdrop allocation report",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(&cli.global_args.logging_format);

    let config = load_config(&cli.global_args).unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {e}"));
        std::process::exit(1);
    });

    match cli.command.unwrap_or(Commands::Report { report_args: ReportArgs::default() }) {
        Commands::Report { report_args } => {
            let mut config = config;
            if let Some(output_dir) = report_args.output_dir {
                config.report.output_dir = output_dir;
            }
            validate_or_exit(&config);

            let aggregator = ReportAggregator::from_config(&config)?;
            let summary = aggregator.run(&report_args.addresses).await.inspect_err(|e| {
                print_error(&format!("Failed to process addresses: {e}"));
            })?;

            let report_path =
                write_report(&config.report.output_dir, &config.report.prefix, &summary)
                    .inspect_err(|e| print_error(&format!("Failed to save report: {e}")))?;

            println!("{}", render_summary(&summary, &report_path));
        }
        Commands::Check { address } => {
            validate_or_exit(&config);

            let aggregator = ReportAggregator::from_config(&config)?;
            let result = aggregator.process_address(address.trim()).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Config { config_command } => match config_command {
            ConfigCommands::Validate => {
                validate_or_exit(&config);
                println!("Configuration is valid");
            }
            ConfigCommands::Show => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ReportError::SerializationError(format!("Failed to render config: {e}"))
                })?;
                println!("{rendered}");
            }
        },
    }

    Ok(())
}

/// Config file (or defaults) with command-line and environment overrides applied.
fn load_config(args: &GlobalArgs) -> Result<Config, ReportError> {
    let mut config = Config::load_or_default(args.config.as_ref())?;

    if let Some(url) = &args.devnet_rpc_url {
        config.networks.devnet.rpc_url = url.clone();
    }
    if let Some(url) = &args.testnet_rpc_url {
        config.networks.testnet.rpc_url = url.clone();
    }
    if let Some(url) = &args.airdrop_url {
        config.airdrop.url = url.clone();
    }

    Ok(config)
}

fn validate_or_exit(config: &Config) {
    if let Err(errors) = config.validate() {
        for e in errors {
            print_error(&format!("Validation error: {e}"));
        }
        std::process::exit(1);
    }
}

fn print_error(message: &str) {
    eprintln!("Error: {message}");
}

fn setup_logging(format: &LoggingFormat) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let subscriber =
        tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
    match format {
        LoggingFormat::Standard => subscriber.init(),
        LoggingFormat::Json => subscriber.json().init(),
    }
}
