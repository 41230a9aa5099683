//! tl-project: rig configuration file format, migration and validation.
//!
//! A rig file is turned into a [`tl_calibration::CalibrationProfile`] once,
//! before any sample is processed. Every missing or invalid constant is a
//! configuration error reported here; nothing is silently defaulted.

pub mod migrate;
pub mod profile;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

use serde_yaml::Value;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse, migrate and validate a rig document already loaded as a YAML tree.
pub fn from_value(doc: Value) -> ProjectResult<RigConfig> {
    let doc = migrate_to_latest(doc)?;
    let config: RigConfig = serde_yaml::from_value(doc)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<RigConfig> {
    from_value(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<RigConfig> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    from_value(serde_yaml::to_value(json)?)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RigConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, config: &RigConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RigConfig> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, config: &RigConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by file extension: `.json` is JSON, anything else YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<RigConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
