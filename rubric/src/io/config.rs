//! Tool configuration stored in `rubric.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::document::{DEFAULT_LEVELS, level_key};

/// Rubric tool configuration (TOML).
///
/// This file is intended to be edited by humans. Missing fields default to
/// the standard five-level scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RubricConfig {
    /// Level names used when bootstrapping new documents, best to worst.
    pub default_levels: Vec<String>,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            default_levels: DEFAULT_LEVELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RubricConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_levels.is_empty() {
            return Err(anyhow!("default_levels must be a non-empty array"));
        }
        let mut keys = std::collections::BTreeSet::new();
        for level in &self.default_levels {
            if level.trim().is_empty() {
                return Err(anyhow!("default_levels entries must be non-empty"));
            }
            if !keys.insert(level_key(level)) {
                return Err(anyhow!(
                    "default_levels entries must derive distinct keys: {level:?}"
                ));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RubricConfig::default()`.
pub fn load_config(path: &Path) -> Result<RubricConfig> {
    if !path.exists() {
        let cfg = RubricConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RubricConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RubricConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RubricConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("rubric.toml");
        let cfg = RubricConfig {
            default_levels: vec!["Bajo".to_string(), "Alto".to_string()],
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn rejects_levels_with_colliding_keys() {
        let cfg = RubricConfig {
            default_levels: vec!["Muy Alto".to_string(), "muy alto".to_string()],
        };
        assert!(cfg.validate().is_err());
    }
}
