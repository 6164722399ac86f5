use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use certbun::{config::Config, error::CertbunResult, wire::client::PorkbunClient};

#[derive(Parser, Debug)]
#[command(
    name = "certbun",
    version,
    about = "Retrieve a domain's SSL bundle from Porkbun and install it"
)]
struct Cli {
    /// Env file defining API_KEY, SECRET_API_KEY, DOMAIN and CERT_INSTALL_DIR
    config_file: PathBuf,

    #[arg(long, default_value = certbun::DEFAULT_API_URL, hide = true)]
    api_url: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CertbunResult<()> {
    let config = Config::load(&cli.config_file)?;
    tracing::debug!(?config, "loaded config");

    let client = PorkbunClient::new(certbun::default_http_client(), cli.api_url.as_str())?;
    let installed = async_std::task::block_on(certbun::run(&config, &client))?;
    tracing::info!(?installed, "installed ssl bundle");
    Ok(())
}
