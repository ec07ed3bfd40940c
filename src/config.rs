use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use jsonschema::{JSONSchema, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::allocation::AllocationSettings;

pub const DEFAULT_CONFIG_FILE: &str = "slipway.jsonc";

const BUNDLED_SCHEMA: &str = include_str!("../slipway.schema.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default)]
    pub ignore_length: bool,
    #[serde(default)]
    pub price_per_sqft: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub legacy_fit_recheck: bool,
}

impl AllocationConfig {
    pub fn settings(&self) -> AllocationSettings {
        AllocationSettings {
            ignore_length: self.ignore_length,
            price_per_sqft: self.price_per_sqft,
            legacy_fit_recheck: self.legacy_fit_recheck,
        }
    }
}

fn default_enabled_true() -> bool {
    true
}

fn default_logging_filter() -> String {
    "warn".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_logging_retention_days() -> usize {
    14
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    /// JSON file logs are written only when a directory is configured.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_logging_retention_days")]
    pub retention_days: usize,
    #[serde(default = "default_enabled_true")]
    pub stderr_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_logging_filter(),
            dir: None,
            rotation: default_logging_rotation(),
            retention_days: default_logging_retention_days(),
            stderr_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let schema = load_schema(config_base, &config_value)?;
        validate_against_schema(&config_value, &schema)?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize config")?;

        if let Some(dir) = config.logging.dir.as_mut()
            && !dir.is_absolute()
        {
            *dir = config_base.join(&*dir);
        }

        Ok(config)
    }

    /// Loads `explicit` when given, otherwise `./slipway.jsonc` if present, otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = std::env::current_dir()
            .context("failed to read current working directory")?
            .join(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }

        Ok(Self::default())
    }
}

fn load_schema(config_base: &Path, config_value: &Value) -> Result<Value> {
    let schema_content = match resolve_schema_path(config_base, config_value) {
        Some(schema_path) => fs::read_to_string(&schema_path)
            .with_context(|| format!("failed to read schema {}", schema_path.display()))?,
        None => BUNDLED_SCHEMA.to_string(),
    };

    serde_json::from_str(&schema_content).context("failed to parse config schema")
}

fn resolve_schema_path(config_base: &Path, config_value: &Value) -> Option<PathBuf> {
    if let Some(path_text) = config_value.get("$schema").and_then(|value| value.as_str()) {
        let configured = PathBuf::from(path_text);
        if configured.is_absolute() {
            return Some(configured);
        }
        return Some(config_base.join(&configured));
    }

    let local_default = config_base.join("slipway.schema.json");
    local_default.exists().then_some(local_default)
}

fn validate_against_schema(config_value: &Value, schema: &Value) -> Result<()> {
    let compiled =
        JSONSchema::compile(schema).map_err(|e| anyhow!("failed to compile schema: {e}"))?;

    match compiled.validate(config_value) {
        Ok(()) => Ok(()),
        Err(errors_iter) => {
            let validation_errors: Vec<ValidationError> = errors_iter.collect();
            let messages: Vec<String> = validation_errors
                .into_iter()
                .map(|error| error.to_string())
                .collect();
            Err(anyhow!("config validation failed: {}", messages.join("; ")))
        }
    }
}
