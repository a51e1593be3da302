use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Settings read from `preflight.toml`. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interpreter used to import backend modules (name on PATH or a path).
    pub interpreter: String,
    /// Backend source root, relative to the project root. Prepended to the
    /// module search path before any import probe runs.
    pub backend_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            backend_dir: PathBuf::from("backend"),
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Returns the default path to `preflight.toml` under the project root.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join("preflight.toml")
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. The default file is optional and falls back to
/// built-in defaults when absent.
pub fn resolve_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = default_config_path(root);
            if path.is_file() {
                load_config(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
