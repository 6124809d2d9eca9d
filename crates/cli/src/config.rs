use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("output format must be 'text' or 'json', got '{other}'"),
        }
    }
}

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Default schedules directory for `cronmath schedules`
    #[serde(default)]
    pub schedules_dir: Option<PathBuf>,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            log_filter: default_log_filter(),
            schedules_dir: None,
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

impl CliConfig {
    /// Return the default config file path: ~/.config/cronmath/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("could not determine user config directory")?
            .join("cronmath")
            .join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };
        Self::load_from(&config_path)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(?config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!(?config_path, "Loading config");
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))
    }

    /// Resolve the output format.
    /// Priority: cli_override > CRONMATH_OUTPUT > config file.
    pub fn resolve_output(&self, cli_override: Option<OutputFormat>) -> Result<OutputFormat> {
        if let Some(format) = cli_override {
            return Ok(format);
        }
        if let Some(value) = env_opt("CRONMATH_OUTPUT") {
            return value
                .parse()
                .context("invalid CRONMATH_OUTPUT environment variable");
        }
        Ok(self.output)
    }

    /// Resolve the schedules directory.
    /// Priority: cli_override > CRONMATH_SCHEDULES_DIR > config file.
    pub fn resolve_schedules_dir(&self, cli_override: Option<PathBuf>) -> Option<PathBuf> {
        cli_override
            .or_else(|| env_opt("CRONMATH_SCHEDULES_DIR").map(PathBuf::from))
            .or_else(|| self.schedules_dir.clone())
    }

    /// Resolve the tracing filter directive.
    /// Priority: RUST_LOG > config file > "warn".
    pub fn resolve_log_filter(&self) -> String {
        env_opt("RUST_LOG").unwrap_or_else(|| self.log_filter.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.log_filter, "warn");
        assert!(config.schedules_dir.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = \"json\"\nschedules_dir = \"/srv/schedules\"\n").unwrap();

        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.schedules_dir, Some(PathBuf::from("/srv/schedules")));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = [").unwrap();

        let err = CliConfig::load(path.to_str()).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn test_resolve_cli_override_wins() {
        let config = CliConfig {
            output: OutputFormat::Text,
            schedules_dir: Some(PathBuf::from("/from/config")),
            ..CliConfig::default()
        };
        assert_eq!(
            config.resolve_output(Some(OutputFormat::Json)).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            config.resolve_schedules_dir(Some(PathBuf::from("/from/cli"))),
            Some(PathBuf::from("/from/cli"))
        );
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" text ".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig {
            output: OutputFormat::Json,
            log_filter: "cronmath_core=trace".to_string(),
            schedules_dir: Some(PathBuf::from("schedules")),
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
