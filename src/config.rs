//! Runtime configuration from environment variables.
//!
//! Supported:
//! - MEDILENS_API_URL (default `http://localhost:8000/api`)
//! - MEDILENS_GATEWAY=`http|demo`
//! - MEDILENS_TIMEOUT_SECS (default 120)
//! - MEDILENS_RISK_SEED (unset: OS entropy)
//! - MEDILENS_LOG_MODE=`auto|file|stdout`
//! - MEDILENS_LOG_FILE (default `medilens.log`)
//!
//! Invalid values are replaced by the default and noted in `warnings`, which
//! the binary logs once the subscriber is up.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LOG_FILE: &str = "medilens.log";

/// Which analysis backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayKind {
    #[default]
    Http,
    /// Built-in placeholder analysis, no network.
    Demo,
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub gateway: GatewayKind,
    pub timeout_secs: u64,
    pub risk_seed: Option<u64>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,

    /// Problems found while reading the environment
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            gateway: GatewayKind::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            risk_seed: None,
            log_mode: LogMode::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("MEDILENS_API_URL") {
            if v.starts_with("http://") || v.starts_with("https://") {
                cfg.api_url = v.trim_end_matches('/').to_string();
            } else {
                cfg.warnings
                    .push(format!("Ignoring MEDILENS_API_URL without http(s) scheme: {v}"));
            }
        }

        if let Some(v) = get("MEDILENS_GATEWAY") {
            match v.to_ascii_lowercase().as_str() {
                "http" => cfg.gateway = GatewayKind::Http,
                "demo" => cfg.gateway = GatewayKind::Demo,
                _ => cfg
                    .warnings
                    .push(format!("Unknown MEDILENS_GATEWAY {v:?}, using http")),
            }
        }

        if let Some(v) = get("MEDILENS_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(x) if x > 0 => cfg.timeout_secs = x,
                _ => cfg.warnings.push(format!(
                    "Invalid MEDILENS_TIMEOUT_SECS {v:?}, using {DEFAULT_TIMEOUT_SECS}"
                )),
            }
        }

        if let Some(v) = get("MEDILENS_RISK_SEED") {
            match v.parse::<u64>() {
                Ok(seed) => cfg.risk_seed = Some(seed),
                Err(_) => cfg
                    .warnings
                    .push(format!("Invalid MEDILENS_RISK_SEED {v:?}, using entropy")),
            }
        }

        if let Some(v) = get("MEDILENS_LOG_MODE") {
            match v.to_ascii_lowercase().as_str() {
                "auto" => cfg.log_mode = LogMode::Auto,
                "file" => cfg.log_mode = LogMode::File,
                "stdout" => cfg.log_mode = LogMode::Stdout,
                _ => cfg
                    .warnings
                    .push(format!("Unknown MEDILENS_LOG_MODE {v:?}, using auto")),
            }
        }

        if let Some(v) = get("MEDILENS_LOG_FILE") {
            cfg.log_file = PathBuf::from(v);
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, Config::default());
        assert!(cfg.warnings.is_empty());
        assert_eq!(cfg.api_url, "http://localhost:8000/api");
        assert_eq!(cfg.timeout_secs, 120);
    }

    #[test]
    fn test_reads_values() {
        let cfg = config_from(&[
            ("MEDILENS_API_URL", "https://lab.example.org/api/"),
            ("MEDILENS_GATEWAY", "Demo"),
            ("MEDILENS_TIMEOUT_SECS", "30"),
            ("MEDILENS_RISK_SEED", "42"),
            ("MEDILENS_LOG_MODE", "stdout"),
            ("MEDILENS_LOG_FILE", "/tmp/m.log"),
        ]);
        assert_eq!(cfg.api_url, "https://lab.example.org/api");
        assert_eq!(cfg.gateway, GatewayKind::Demo);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.risk_seed, Some(42));
        assert_eq!(cfg.log_mode, LogMode::Stdout);
        assert_eq!(cfg.log_file, PathBuf::from("/tmp/m.log"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config_from(&[
            ("MEDILENS_API_URL", "localhost:8000"),
            ("MEDILENS_GATEWAY", "grpc"),
            ("MEDILENS_TIMEOUT_SECS", "0"),
            ("MEDILENS_RISK_SEED", "-1"),
            ("MEDILENS_LOG_MODE", "syslog"),
        ]);
        assert_eq!(cfg.warnings.len(), 5);
        assert_eq!(
            Config {
                warnings: Vec::new(),
                ..cfg
            },
            Config::default()
        );
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
