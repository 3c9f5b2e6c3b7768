/// Config file loading and creation for bowlpair CLI.
///
/// Config lives at ~/.config/bowlpair/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug)]
pub struct BowlpairConfig {
    /// "round-robin" or "swiss"
    pub method: Option<String>,
    pub seed: Option<u64>,
    pub total_rounds: Option<u32>,
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# bowlpair configuration
# All values here can be overridden by CLI flags.

# Pairing method: \"swiss\" or \"round-robin\"
# method = \"swiss\"

# Seed for the round-1 Swiss draw. Leave unset for a fresh draw every time.
# seed = 2024

# Last round of the event. Requests for later rounds are rejected.
# total_rounds = 5

# Print JSON instead of tables
# json = false
";

/// Returns the default config path: ~/.config/bowlpair/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("bowlpair").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<BowlpairConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> BowlpairConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BowlpairConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Write the default config template to `path`, creating parent directories.
/// Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| format!("Failed to write config to {}: {e}", path.display()))
}

/// Create the default config file at `path`. Exits if it already exists.
pub fn create_default_config(path: &Path) {
    write_default_config(path).unwrap_or_else(|e| bail(e));
}
