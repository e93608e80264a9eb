//! Server configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use spamguard_classifiers::DEFAULT_ARTIFACT_FILE;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model artifact path, resolved against the executable's directory
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,

    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(&cli.config).exists() {
            let content = std::fs::read_to_string(&cli.config)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(artifact) = &cli.artifact {
            config.artifact_path = artifact.clone();
        }
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if cli.json_logs {
            config.log_format = LogFormat::Json;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.artifact_path.as_os_str().is_empty() {
            anyhow::bail!("artifact_path must not be empty");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than zero");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.listen, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            artifact_path: default_artifact_path(),
            max_body_bytes: default_max_body_bytes(),
            cors_allowed_origins: Vec::new(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_FILE)
}

// 10,000 characters of up to 4 bytes each, plus JSON framing
fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli_for(config: &str) -> Cli {
        Cli {
            config: config.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load(&cli_for("/nonexistent/spamguard.yaml")).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.artifact_path, PathBuf::from(DEFAULT_ARTIFACT_FILE));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_file_then_cli_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 9100\n\
             artifact_path: models/spam.yaml\n\
             log_format: json\n\
             cors_allowed_origins: [\"http://localhost:5173\"]"
        )
        .unwrap();

        let mut cli = cli_for(file.path().to_str().unwrap());
        let config = ServerConfig::load(&cli).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.artifact_path, PathBuf::from("models/spam.yaml"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cors_allowed_origins.len(), 1);

        cli.port = Some(9200);
        cli.artifact = Some(PathBuf::from("/srv/model.json"));
        let config = ServerConfig::load(&cli).unwrap();
        assert_eq!(config.port, 9200);
        assert_eq!(config.artifact_path, PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_body_bytes: 0").unwrap();
        assert!(ServerConfig::load(&cli_for(file.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn test_demo_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/spamguard.yaml");
        let config = ServerConfig::load(&cli_for(path)).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.artifact_path, PathBuf::from(DEFAULT_ARTIFACT_FILE));
        assert_eq!(config.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            listen: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }
}
