use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CliError;

/// Only the `http` section of the server's config file matters to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a JSON file, canonicalizing loopback aliases.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        log::info!("config load. '{}'", path.display());
        let content = fs::read_to_string(path).map_err(|e| CliError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(content)?;
        config.http.address = canonical_host(&config.http.address).to_string();
        Ok(config)
    }

    /// `http://<host>:<port>/ebr/api`
    pub fn base_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            canonical_host(&self.http.address),
            self.http.port,
            common::API_PATH
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

/// `0.0.0.0`, `localhost` and `127.0.0.1` all name the local host.
pub fn canonical_host(address: &str) -> &str {
    let trimmed = address.trim();
    let is_loopback = trimmed == "0.0.0.0"
        || trimmed == common::LOOPBACK
        || trimmed.eq_ignore_ascii_case("localhost");
    if is_loopback {
        common::LOOPBACK
    } else {
        trimmed
    }
}

/// Default config location: `<bin dir>/../conf/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(conf_dir()?.join(common::CONFIG_FILE))
}

/// The `conf` directory sits next to the directory holding the binary.
pub fn conf_dir() -> Result<PathBuf> {
    let bin = bin_dir()?;
    let parent = bin
        .parent()
        .with_context(|| format!("Binary directory has no parent: {:?}", bin))?;
    Ok(parent.join(common::CONF_DIR))
}

/// Directory holding the running executable, with symlinks resolved.
///
/// Binaries launched from the system temp dir are ephemeral builds; those
/// resolve to `<source root>/bin` so the checked-in `conf/` is found.
pub fn bin_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe_dir = exe
        .parent()
        .with_context(|| format!("Executable has no parent directory: {:?}", exe))?;
    let resolved = fs::canonicalize(exe_dir)
        .with_context(|| format!("Failed to resolve executable directory: {:?}", exe_dir))?;

    let tmp = fs::canonicalize(std::env::temp_dir()).unwrap_or_else(|_| std::env::temp_dir());
    if is_within(&resolved, &tmp) {
        return Ok(source_root().join("bin"));
    }
    Ok(resolved)
}

fn source_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

fn is_within(path: &Path, dir: &Path) -> bool {
    dir.components().count() > 1 && path.starts_with(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_aliases_share_one_form() {
        for addr in ["0.0.0.0", "localhost", "127.0.0.1", " LocalHost "] {
            assert_eq!(canonical_host(addr), "127.0.0.1");
        }
        assert_eq!(canonical_host("10.0.0.5"), "10.0.0.5");
        assert_eq!(canonical_host("sched.internal"), "sched.internal");
    }

    #[test]
    fn test_base_url() {
        let config =
            Config::from_json(r#"{"http": {"address": "0.0.0.0", "port": 8080}}"#).unwrap();
        assert_eq!(config.http.address, "127.0.0.1");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/ebr/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_same_for_every_alias() {
        let urls: Vec<String> = ["0.0.0.0", "localhost", "127.0.0.1"]
            .iter()
            .map(|a| {
                Config::from_json(&format!(r#"{{"http": {{"address": "{}", "port": 9000}}}}"#, a))
                    .unwrap()
                    .base_url()
            })
            .collect();
        assert!(urls.iter().all(|u| u == "http://127.0.0.1:9000/ebr/api"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::from_file(Path::new("/nonexistent/ebr/config.json")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit::FILE_ERROR);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"http": {"address": "localhost"}}"#).unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit::JSON_ERROR);

        fs::write(&path, "not json").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit::JSON_ERROR);
    }

    #[test]
    fn test_custom_timeout() {
        let config = Config::from_json(
            r#"{"http": {"address": "sched", "port": 80, "timeout_secs": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_path_lands_in_conf() {
        let path = default_config_path().unwrap();
        assert!(path.ends_with("conf/config.json"));
    }
}
