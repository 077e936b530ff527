//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, an optional `stoich.toml`
//! (or the file named by `STOICH_CONFIG`), then `STOICH__SECTION__KEY`
//! environment variables. A `.env` file is loaded before anything is read.
//! Command-line flags are applied on top by the binary.

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

use crate::export::ExportFormat;

const DEFAULT_CONFIG_FILE: &str = "stoich";
const ENV_PREFIX: &str = "STOICH";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub masses: MassesConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this tool's own targets; `RUST_LOG` takes precedence.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MassesConfig {
    /// JSON object of `{symbol: mass}` entries added to the standard table.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
}

/// A missing `.env` is the normal case; any other failure is reported.
fn load_dotenv(result: Result<PathBuf, dotenvy::Error>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("Failed to load .env file"),
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        load_dotenv(dotenvy::dotenv())?;

        let file = std::env::var("STOICH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration from '{file}'"))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "logging.level must be one of {}, got '{}'",
                LEVELS.join(", "),
                self.logging.level
            ));
        }
        if let Some(file) = &self.masses.file {
            if file.as_os_str().is_empty() {
                return Err("masses.file must not be empty".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
        assert_eq!(config.export.format, ExportFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dotenv_only_tolerates_a_missing_file() {
        let missing = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(load_dotenv(Err(missing)).is_ok());
        assert!(load_dotenv(Ok(PathBuf::from(".env"))).is_ok());

        let malformed = dotenvy::Error::LineParse("NOT VALID".into(), 4);
        let err = load_dotenv(Err(malformed)).unwrap_err();
        assert!(err.to_string().contains(".env"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".into();
        assert!(config.validate().unwrap_err().contains("logging.level"));

        config.logging.level = "DEBUG".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_sources() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[export]\nformat = \"csv\"\n[masses]\nfile = \"isotopes.json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert_eq!(config.masses.file, Some(PathBuf::from("isotopes.json")));
        assert_eq!(config.logging.level, "warn");
    }
}
