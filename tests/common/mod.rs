use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use tempfile::TempDir;

pub const SUCCESS_BODY: &str =
    r#"{"status":"SUCCESS","certificatechain":"CHAIN","privatekey":"PRIV","publickey":"PUB"}"#;

pub const RETRIEVE_PATH: &str = "/api/json/v3/ssl/retrieve";

pub const BUNDLE_FILES: [&str; 3] = ["private.key.pem", "public.key.pem", "cert.pem"];

const CONFIG_VARS: [&str; 4] = ["API_KEY", "SECRET_API_KEY", "DOMAIN", "CERT_INSTALL_DIR"];

pub struct TestEnv {
    tmp: TempDir,
    pub install_dir: PathBuf,
    api: ServerGuard,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let install_dir = tmp.path().join("certs");
        fs::create_dir_all(&install_dir).expect("create install dir");
        Self {
            tmp,
            install_dir,
            api: Server::new(),
        }
    }

    /// Writes an env file for `example.com` installing into `install_dir`.
    pub fn write_config(&self, install_dir: &Path) -> PathBuf {
        let path = self.tmp.path().join("config.env");
        let contents = format!(
            "API_KEY=abc\nSECRET_API_KEY=def\nDOMAIN=example.com\nCERT_INSTALL_DIR={}\n",
            install_dir.display()
        );
        fs::write(&path, contents).expect("write config file");
        path
    }

    pub fn api_url(&self) -> String {
        format!("{}{RETRIEVE_PATH}", self.api.url())
    }

    /// Expects one retrieve call for `domain` carrying the `abc`/`def` key
    /// pair, and answers it with `status` and `body`.
    pub fn expect_retrieve(&mut self, domain: &str, status: usize, body: &str) -> Mock {
        self.api
            .mock("POST", format!("{RETRIEVE_PATH}/{domain}").as_str())
            .match_header("content-type", Matcher::Regex("^application/json".into()))
            .match_body(Matcher::Json(serde_json::json!({
                "apikey": "abc",
                "secretapikey": "def",
            })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create()
    }

    /// Runs the binary against the mock API with `config` as its env file.
    pub fn cmd_with_config(&self, config: &Path) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--api-url").arg(self.api_url()).arg(config);
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("certbun");
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn installed(&self, file: &str) -> Option<String> {
        fs::read_to_string(self.install_dir.join(file)).ok()
    }

    pub fn install_dir_is_empty(&self) -> bool {
        fs::read_dir(&self.install_dir)
            .expect("read install dir")
            .next()
            .is_none()
    }
}

/// An address nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{addr}{RETRIEVE_PATH}")
}
