//! CLI binary for the cloudmeta crate.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use cloudmeta::{
    ClientConfig, CloudMetadata, CloudProvider, InstanceInfo, MetadataError, MetadataField,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloudmeta")]
#[command(
    author,
    version,
    about = "Detect the cloud provider and query instance metadata"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Skip detection and use this provider
    #[arg(short, long, global = true)]
    provider: Option<CloudProvider>,

    /// Metadata service base URL (defaults to the link-local address)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Total timeout per request, in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log probe details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the current cloud provider
    Detect,

    /// Fetch a single metadata field
    Get {
        /// instance-id, hostname, private-ipv4, public-ipv4, or ipv6
        field: MetadataField,
    },

    /// Fetch every metadata field
    All {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    config
}

async fn resolve(cli: &Cli) -> Result<CloudMetadata, MetadataError> {
    let config = client_config(cli);
    match cli.provider {
        Some(provider) => CloudMetadata::with_config(provider, &config),
        None if config == ClientConfig::default() => cloudmeta::get_provider().await.cloned(),
        None => cloudmeta::detect(&config).await,
    }
}

async fn run(cli: Cli) -> Result<(), MetadataError> {
    let metadata = resolve(&cli).await?;

    match cli.command {
        Commands::Detect => {
            println!("{}", metadata.name());
        }
        Commands::Get { field } => {
            println!("{}", metadata.field(field).await?);
        }
        Commands::All { format } => {
            let info = metadata.instance_info().await?;
            match format {
                OutputFormat::Text => print_text(&info),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
            }
        }
    }
    Ok(())
}

fn print_text(info: &InstanceInfo) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "none".to_string());
    println!("Cloud Provider: {}", info.provider);
    println!("Instance ID: {}", show(&info.instance_id));
    println!("Hostname: {}", show(&info.hostname));
    println!("Public IPv4: {}", show(&info.public_ipv4));
    println!("Private IPv4: {}", show(&info.private_ipv4));
    println!("Primary IPv6: {}", show(&info.primary_ipv6));
}
