use std::fmt;

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "SUCCESS";

#[derive(Serialize)]
pub struct RetrieveRequest<'a> {
    #[serde(rename = "apikey")]
    pub api_key: &'a str,
    #[serde(rename = "secretapikey")]
    pub secret_api_key: &'a str,
}

/// Certificate bundle returned by the retrieve endpoint. Absent fields decode
/// as empty strings.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RetrieveResult {
    pub status: String,
    #[serde(rename = "certificatechain")]
    pub certificate_chain: String,
    #[serde(rename = "privatekey")]
    pub private_key: String,
    #[serde(rename = "publickey")]
    pub public_key: String,
}

impl fmt::Debug for RetrieveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieveResult")
            .field("status", &self.status)
            .field("certificate_chain", &self.certificate_chain)
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
