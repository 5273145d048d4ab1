use super::schema::UmbraConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid mass pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./umbra.yaml
    /// 2. ~/.umbra/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<UmbraConfig, ConfigError> {
        let local_config = PathBuf::from("./umbra.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".umbra").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(UmbraConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<UmbraConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: UmbraConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BackendKind;
    use std::io::Write;

    #[tokio::test]
    async fn load_from_reads_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source:\n  base_url: http://example.test/agn\n  timeout_secs: 5\nbackend:\n  kind: static"
        )
        .unwrap();

        let config = ConfigLoader::load_from(file.path()).await.unwrap();
        assert_eq!(config.source.base_url, "http://example.test/agn");
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.backend.kind, BackendKind::Static);
    }

    #[tokio::test]
    async fn unknown_strategy_kind_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategy:\n  kind: xpath").unwrap();

        let result = ConfigLoader::load_from(file.path()).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[tokio::test]
    async fn load_from_missing_file_is_io_error() {
        let result = ConfigLoader::load_from(Path::new("/nonexistent/umbra.yaml")).await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
