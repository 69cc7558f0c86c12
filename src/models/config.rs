use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const BACKEND_URL_ENV: &str = "PROBLIST_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
        }
    }
}

impl UserConfig {
    /// The URL to talk to, with the environment taking precedence over the file.
    pub fn resolved_backend_url(&self) -> String {
        match env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.backend_url.clone(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("problist").join("config.json"))
}

pub fn load_config() -> UserConfig {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::warn!("could not determine home directory, using default config");
            UserConfig::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> UserConfig {
    if !path.exists() {
        return UserConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config {}: {}", path.display(), e);
            UserConfig::default()
        }),
        Err(_) => UserConfig::default(),
    }
}

pub fn save_config(config: &UserConfig) -> Result<(), std::io::Error> {
    let path = get_config_path().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Could not determine home directory")
    })?;
    save_config_to(&path, config)
}

pub fn save_config_to(path: &Path, config: &UserConfig) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)
}
