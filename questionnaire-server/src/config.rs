use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contents of `questionnaire.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub survey: SurveyConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Survey definition file (JSON).
    #[serde(default = "default_survey_path")]
    pub path: PathBuf,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            path: default_survey_path(),
        }
    }
}

fn default_survey_path() -> PathBuf {
    PathBuf::from("surveys/job_satisfaction.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite response log.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Default target of `questionnaire export`.
    #[serde(default = "default_export")]
    pub export: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            export: default_export(),
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("survey_responses.db")
}

fn default_export() -> PathBuf {
    PathBuf::from("data/processed/survey_results.csv")
}

impl AppConfig {
    /// Load config from a TOML file, expanding `${ENV_VAR}` references.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&expand_env_vars(content))?)
    }
}

/// Replace `${NAME}` with the value of the environment variable `NAME`.
/// Unset variables expand to the empty string.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                out.push_str(&std::env::var(&after[..end]).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.survey.path, PathBuf::from("surveys/job_satisfaction.json"));
        assert_eq!(config.storage.database, PathBuf::from("survey_responses.db"));
        assert_eq!(
            config.storage.export,
            PathBuf::from("data/processed/survey_results.csv")
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [storage]
            database = "/var/lib/questionnaire/responses.db"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.storage.database,
            PathBuf::from("/var/lib/questionnaire/responses.db")
        );
        assert_eq!(
            config.storage.export,
            PathBuf::from("data/processed/survey_results.csv")
        );
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nbind = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert!(AppConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questionnaire.toml");
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn env_vars_are_expanded() {
        assert_eq!(expand_env_vars("plain"), "plain");
        assert_eq!(expand_env_vars("a ${QUESTIONNAIRE_SURELY_UNSET_VAR} b"), "a  b");
        assert_eq!(expand_env_vars("broken ${NOPE"), "broken ${NOPE");

        let path = std::env::var("PATH").unwrap_or_default();
        assert_eq!(expand_env_vars("${PATH}"), path);
    }
}
