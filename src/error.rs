use std::fmt;

use thiserror::Error;

pub type CertbunResult<T> = Result<T, CertbunError>;

#[derive(Error, Debug)]
pub enum CertbunError {
    #[error("failed to read config file: {0}")]
    ConfigLoad(#[from] dotenvy::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to marshal request payload: {0}")]
    Encode(http_client::Error),

    #[error("failed to request ssl certificates: {0}")]
    Transport(http_client::Error),

    #[error("response failed with status code: {status} and body: {body}")]
    Status { status: u16, body: String },

    #[error("failed to read response payload: {0}")]
    ReadBody(http_client::Error),

    #[error("failed to unmarshal response payload: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to write {file}: {source}")]
    Write {
        file: BundleFile,
        #[source]
        source: std::io::Error,
    },
}

/// One of the three files making up an installed certificate bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFile {
    PrivateKey,
    PublicKey,
    Certificate,
}

impl BundleFile {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::PrivateKey => "private.key.pem",
            Self::PublicKey => "public.key.pem",
            Self::Certificate => "cert.pem",
        }
    }
}

impl fmt::Display for BundleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PrivateKey => "private key",
            Self::PublicKey => "public key",
            Self::Certificate => "certificate",
        })
    }
}
