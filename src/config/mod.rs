mod settings;

pub use settings::{Config, DisplaySettings, ExportSettings, Firm};

use crate::error::{AtelierError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "ATELIER_DIR";

/// Get the data directory path ($ATELIER_DIR, XDG config dir, or ~/.atelier/)
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "atelier") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.atelier/
    let home = dirs_home().ok_or_else(|| {
        AtelierError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".atelier"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Export directory from config; relative paths live under the data directory.
pub fn resolve_output_dir(output_dir: &str, data_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        data_dir.join(path)
    }
}

/// Fail early with a hint when `init` has not been run.
pub fn ensure_initialized(data_dir: &Path) -> Result<()> {
    if data_dir.exists() {
        Ok(())
    } else {
        Err(AtelierError::ConfigNotFound(data_dir.to_path_buf()))
    }
}

/// Load the main config.toml
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Err(AtelierError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    parse_config(&content).map_err(|e| match e {
        ParseFailure::Toml(source) => AtelierError::ConfigParse { path, source },
        ParseFailure::Invalid(msg) => AtelierError::InvalidConfig(msg),
    })
}

#[derive(Debug)]
enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(String),
}

fn parse_config(content: &str) -> std::result::Result<Config, ParseFailure> {
    let config: Config = toml::from_str(content).map_err(ParseFailure::Toml)?;
    if config.display.page_size == 0 {
        return Err(ParseFailure::Invalid(
            "display.page_size must be at least 1".to_string(),
        ));
    }
    debug!(firm = %config.firm.name, page_size = config.display.page_size, "config loaded");
    Ok(config)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[firm]
name = "Your Studio Name"
# email = "studio@example.com"   # optional
# phone = "+91 98200 00000"      # optional

[display]
currency_symbol = "₹"
page_size = 7                    # rows per page on list screens

[export]
output_dir = "exports"           # relative paths live under the data directory
"#;
