use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://liquipedia.net".to_string(),
            user_agent: "TourneyTracker/0.1 (https://github.com/tourney-tracker)".to_string(),
            timeout_secs: 30,
            rate_limit_ms: 2000, // wiki API etiquette: at most one page every 2s
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub saved_pages_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "tourney_tracker.db".to_string(),
            saved_pages_dir: PathBuf::from("data").join("saved_pages"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DATABASE_PATH`, `SAVED_PAGES_DIR` and `WIKI_BASE_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        let set = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(path) = set("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Some(dir) = set("SAVED_PAGES_DIR") {
            config.storage.saved_pages_dir = PathBuf::from(dir);
        }
        if let Some(base_url) = set("WIKI_BASE_URL") {
            config.scraper.base_url = base_url.trim_end_matches('/').to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.scraper.base_url, "https://liquipedia.net");
        assert_eq!(config.storage.database_path, "tourney_tracker.db");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_PATH", "/tmp/t.db"),
            ("WIKI_BASE_URL", "http://localhost:8080/"),
            ("SAVED_PAGES_DIR", "  "),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.database_path, "/tmp/t.db");
        assert_eq!(config.scraper.base_url, "http://localhost:8080");
        assert_eq!(config.storage.saved_pages_dir, PathBuf::from("data").join("saved_pages"));
    }
}
