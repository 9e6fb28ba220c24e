// Runtime configuration from environment (.env supported) and command-line flags

use crate::error::{HealthError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/health_data.csv";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub addr: SocketAddr,
    pub report_path: Option<PathBuf>,
}

impl Config {
    /// Read `HEALTHBOT_DATA`, `HEALTHBOT_ADDR` and `HEALTHBOT_REPORT`, loading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("HEALTHBOT_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let addr_text = lookup("HEALTHBOT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .parse()
            .map_err(|_| HealthError::Config(format!("invalid HEALTHBOT_ADDR: {}", addr_text)))?;

        let report_path = lookup("HEALTHBOT_REPORT").map(PathBuf::from);

        Ok(Config {
            data_path,
            addr,
            report_path,
        })
    }

    /// Apply `--data <path>` and `--report <path>`, returning the remaining arguments
    pub fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>> {
        let mut rest = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--data" | "--report" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| HealthError::Config(format!("{} needs a value", arg)))?;
                    if arg == "--data" {
                        self.data_path = PathBuf::from(value);
                    } else {
                        self.report_path = Some(PathBuf::from(value));
                    }
                }
                _ => rest.push(arg.clone()),
            }
        }

        Ok(rest)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            report_path: None,
        }
    }
}

/// Install the tracing subscriber (`RUST_LOG` overrides the `healthbot=info` default)
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("healthbot=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("HEALTHBOT_DATA", "/srv/data.csv"),
            ("HEALTHBOT_ADDR", "127.0.0.1:8080"),
            ("HEALTHBOT_REPORT", "scan.png"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/data.csv"));
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.report_path, Some(PathBuf::from("scan.png")));
    }

    #[test]
    fn test_invalid_addr() {
        let result = Config::from_lookup(lookup_from(&[("HEALTHBOT_ADDR", "not-an-addr")]));
        assert!(matches!(result, Err(HealthError::Config(_))));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args: Vec<String> = ["advice", "--data", "x.csv", "Diabetes", "--report", "r.png"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rest = config.apply_args(&args).unwrap();

        assert_eq!(rest, vec!["advice", "Diabetes"]);
        assert_eq!(config.data_path, PathBuf::from("x.csv"));
        assert_eq!(config.report_path, Some(PathBuf::from("r.png")));
        assert!(config.apply_args(&["--data".to_string()]).is_err());
    }
}
