use illustra_backend_client::ClientConfig;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

pub const HOME_ENV_VAR: &str = "ILLUSTRA_HOME";
pub const BASE_URL_ENV_VAR: &str = "ILLUSTRA_BASE_URL";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory; set {HOME_ENV_VAR}")]
    NoHome,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `config.toml` in the client home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub client: ClientConfig,

    /// Clear the selected part category when the engine selection changes.
    #[serde(default = "default_reset_parts_on_engine_change")]
    pub reset_parts_on_engine_change: bool,
}

fn default_reset_parts_on_engine_change() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            reset_parts_on_engine_change: default_reset_parts_on_engine_change(),
        }
    }
}

/// `$ILLUSTRA_HOME` when set and non-empty, `~/.illustra` otherwise.
pub fn find_illustra_home() -> Result<PathBuf, ConfigError> {
    if let Ok(home) = std::env::var(HOME_ENV_VAR)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    let mut home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    home.push(".illustra");
    Ok(home)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILENAME)
}

/// Reads `config.toml` (missing file means defaults), then applies
/// `ILLUSTRA_BASE_URL` and finally the command line override.
pub fn load_config(home: &Path, base_url_override: Option<&str>) -> Result<CliConfig, ConfigError> {
    let path = config_path(home);
    let mut config = match std::fs::read_to_string(&path) {
        Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => CliConfig::default(),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR)
        && !base_url.trim().is_empty()
    {
        config.client.base_url = base_url.trim().to_string();
    }
    if let Some(base_url) = base_url_override {
        config.client.base_url = base_url.to_string();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().unwrap();
        let config = load_config(home.path(), None).unwrap();
        assert!(config.reset_parts_on_engine_change);
        assert_eq!(config.client.cache_ttl_secs, 30);
    }

    #[test]
    fn file_values_and_flag_override() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            config_path(home.path()),
            r#"
base_url = "https://parts.example.com/api"
cache_ttl_secs = 0
reset_parts_on_engine_change = false
"#,
        )
        .unwrap();

        let config = load_config(home.path(), None).unwrap();
        assert_eq!(config.client.cache_ttl_secs, 0);
        assert_eq!(config.client.timeout_secs, 30);
        assert!(!config.reset_parts_on_engine_change);

        let overridden = load_config(home.path(), Some("http://127.0.0.1:9000/api")).unwrap();
        assert_eq!(overridden.client.base_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let home = TempDir::new().unwrap();
        std::fs::write(config_path(home.path()), "cache_ttl_secs = \"soon\"").unwrap();
        let err = load_config(home.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
