use std::env;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::decode_entry;

pub const ENV_ENVIRONMENT: &str = "STRIVE_ENVIRONMENT";
pub const ENV_DEBUG: &str = "STRIVE_DEBUG";
pub const ENV_DATA_DIR: &str = "STRIVE_DATA_DIR";
pub const ENV_API_URL: &str = "STRIVE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub debug: bool,
    /// Katalog for FileStore
    pub data_dir: PathBuf,
    /// f.eks. "http://localhost:8000"; None => kun lokal lagring
    pub api_base_url: Option<String>,
    pub remote_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            debug: true,
            data_dir: PathBuf::from("strive_data"),
            api_base_url: None,
            remote_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Miljøvariabler vinner over fil-verdier.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|k| env::var(k).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_ENVIRONMENT) {
            self.environment = v;
        }
        if let Some(v) = lookup(ENV_DEBUG) {
            self.debug = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_API_URL) {
            let v = v.trim().trim_end_matches('/').to_string();
            self.api_base_url = if v.is_empty() { None } else { Some(v) };
        }
    }
}

/// Leser inn konfig fra disk (JSON) og legger på miljøvariabler.
/// Hvis filen ikke finnes, brukes default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg: AppConfig = decode_entry(&path.display().to_string(), &contents)?;
        info!("📂 Konfig lastet fra {} (env={})", path.display(), cfg.environment);
        cfg
    } else {
        warn!(
            "⚠️ Fant ikke konfig på {}, bruker default",
            path.display()
        );
        AppConfig::default()
    };
    cfg.apply_env();
    Ok(cfg)
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &AppConfig, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path.as_ref(), json)?;
    info!("✅ Konfig lagret til {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_ENVIRONMENT, "production"),
            (ENV_DEBUG, "False"),
            (ENV_API_URL, "http://localhost:8000/"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.environment, "production");
        assert!(!cfg.debug);
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cfg.data_dir, PathBuf::from("strive_data"));
    }

    #[test]
    fn empty_api_url_disables_remote() {
        let mut cfg = AppConfig {
            api_base_url: Some("http://x".into()),
            ..AppConfig::default()
        };
        cfg.apply_overrides(|k| (k == ENV_API_URL).then(|| "  ".to_string()));
        assert_eq!(cfg.api_base_url, None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"debug": false}"#).unwrap();
        assert!(!cfg.debug);
        assert_eq!(cfg.remote_timeout_secs, 10);
    }
}
