use clap::Parser;
use relay_searcher::adapter::inbound::cli::command::Cli;
use relay_searcher::error::Result;
use relay_searcher::infrastructure::bootstrap;
use relay_searcher::infrastructure::config::settings::FileConfig;
use tracing::{error, info};

/// Load the configuration file, or defaults when none was given, with the
/// command-line logging overrides applied.
fn load_file_config(cli: &Cli) -> Result<FileConfig> {
    let mut file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    file.logging = file
        .logging
        .with_overrides(cli.log_level.clone(), cli.log_format.clone());
    Ok(file)
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    // Ignored if a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    let file = match load_file_config(&cli) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    file.logging.init();

    let options = file.relay.options();
    if let Err(e) = bootstrap::run(cli.searcher_config(), &cli.private_key, &options).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }

    info!("relay-searcher stopped");
}
