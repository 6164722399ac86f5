use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use crate::error::CertbunResult;

pub const API_KEY_VAR: &str = "API_KEY";
pub const SECRET_API_KEY_VAR: &str = "SECRET_API_KEY";
pub const DOMAIN_VAR: &str = "DOMAIN";
pub const INSTALL_DIR_VAR: &str = "CERT_INSTALL_DIR";

/// Run configuration, read from the process environment.
///
/// Unset variables become empty strings and nothing here is validated; the
/// API reports bad credentials or domains itself. `install_dir` keeps the raw
/// OS value; the string fields are decoded lossily.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub secret_api_key: String,
    pub domain: String,
    pub install_dir: PathBuf,
}

impl Config {
    /// Loads `env_file` into the process environment, then reads the config
    /// from it. Variables already present in the environment take precedence
    /// over the file.
    pub fn load(env_file: impl AsRef<Path>) -> CertbunResult<Self> {
        dotenvy::from_path(env_file.as_ref())?;
        Ok(Self::from_env())
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        let mut var = |key: &str| lookup(key).unwrap_or_default();
        let install_dir = PathBuf::from(var(INSTALL_DIR_VAR));
        let mut text = |key: &str| var(key).to_string_lossy().into_owned();
        Self {
            api_key: text(API_KEY_VAR),
            secret_api_key: text(SECRET_API_KEY_VAR),
            domain: text(DOMAIN_VAR),
            install_dir,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("secret_api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("install_dir", &self.install_dir)
            .finish()
    }
}
