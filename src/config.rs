//! Configuration for template resolution.
//!
//! The original integration read its settings from ambient process-wide state;
//! here the configuration is an explicit [`Config`] value constructed once at
//! application startup and passed by reference into every render call.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Settings controlling template lookup and error visibility.
///
/// `dirs` is the ordered allow-list of base directories searched for template
/// files; the first match wins. `debug` controls what happens when a template
/// cannot be resolved: `true` surfaces the failure to the caller, `false`
/// renders an empty fragment so a missing template never breaks a page in
/// production.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Ordered list of base directories searched for templates
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Whether resolution failures are surfaced instead of suppressed
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    pub fn new(dirs: Vec<PathBuf>, debug: bool) -> Self {
        Self { dirs, debug }
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
