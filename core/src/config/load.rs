use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "deid.toml";

/// Load from an explicit path, or discover `./deid.toml` then `~/.deid/deid.toml`.
/// Environment overrides are applied last.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => Some(p.to_path_buf()),
        None => discover(),
    };

    let mut cfg = match file {
        Some(p) => read_file(&p)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    cfg.validate()?;
    Ok(cfg)
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    let home = dirs::home_dir()?.join(".deid").join(CONFIG_FILE_NAME);
    home.exists().then_some(home)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("DEID_API_URL") {
        if !v.trim().is_empty() {
            cfg.service.base_url = v.trim().to_string();
        }
    }
    if let Some(v) = lookup("DEID_MODE") {
        match v.parse() {
            Ok(mode) => cfg.service.mode = mode,
            Err(e) => tracing::warn!(target: "deid.config", error = %e, "ignoring DEID_MODE"),
        }
    }
    if let Some(v) = lookup("DEID_TIMEOUT_MS") {
        match v.trim().parse::<u64>() {
            Ok(ms) => cfg.service.timeout_ms = Some(ms),
            Err(_) => tracing::warn!(target: "deid.config", value = %v, "ignoring DEID_TIMEOUT_MS"),
        }
    }
}
