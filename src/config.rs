//! Server configuration from environment variables
//!
//! - `DATA_DIR`: root for `inventory.json` and `workspaces/` (default `data`)
//! - `PORT`: listen port (default 3000)
//!
//! Log filtering is left to `RUST_LOG`.

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable ports fall back to the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self { data_dir, port }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join("inventory.json")
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.data_dir.join("workspaces")
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.inventory_path(), PathBuf::from("data/inventory.json"));
        assert_eq!(config.workspace_dir(), PathBuf::from("data/workspaces"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[("DATA_DIR", "/srv/selector"), ("PORT", "8080")]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/selector"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
