pub mod config;
pub mod error;
pub mod install;
pub mod wire;

use std::{sync::Arc, time::Duration};

use http_client::{h1::H1Client, HttpClient};

use config::Config;
use error::CertbunResult;
use install::{install_bundle, InstalledBundle};
use wire::client::PorkbunClient;

pub static DEFAULT_API_URL: &str = "https://api.porkbun.com/api/json/v3/ssl/retrieve";
pub static DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn default_http_client() -> Arc<dyn HttpClient> {
    Arc::new(H1Client::new())
}

/// Fetches the bundle for `config.domain` and installs it under
/// `config.install_dir`. Nothing is written unless the fetch succeeds.
pub async fn run(config: &Config, client: &PorkbunClient) -> CertbunResult<InstalledBundle> {
    let bundle = client
        .retrieve_ssl(&config.api_key, &config.secret_api_key, &config.domain)
        .await?;
    install_bundle(&config.install_dir, &bundle)
}
