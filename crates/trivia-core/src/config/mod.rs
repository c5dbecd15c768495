//! Configuration system for the question bank.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{TriviaError, TriviaResult};
use crate::pagination::QUESTIONS_PER_PAGE;

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    Sqlite,
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub provider: StoreProvider,
    /// SQLite database file. Ignored by the memory provider.
    pub path: PathBuf,
    /// Seed the default categories when the category table is empty.
    pub seed_default_categories: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let trivia_dir = dirs::home_dir()
            .map(|h| h.join(".trivia"))
            .unwrap_or_else(|| PathBuf::from(".trivia"));

        Self {
            provider: StoreProvider::Sqlite,
            path: trivia_dir.join("trivia.db"),
            seed_default_categories: true,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Main trivia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
    /// Questions per listing page.
    pub page_size: usize,
    /// Fixed seed for quiz draws. Unset means entropy-seeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_seed: Option<u64>,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            server: ServerConfig::default(),
            page_size: QUESTIONS_PER_PAGE,
            quiz_seed: None,
        }
    }
}

impl TriviaConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TriviaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| TriviaError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| TriviaError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| TriviaError::Configuration(e.to_string())),
            _ => Err(TriviaError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables on top of defaults.
    ///
    /// Reads:
    /// - `TRIVIA_CONFIG` (file loaded first, if set)
    /// - `TRIVIA_STORE` (`sqlite` or `memory`)
    /// - `TRIVIA_DB_PATH`
    /// - `TRIVIA_SEED_CATEGORIES` (`true`/`false`)
    /// - `TRIVIA_HOST`, `TRIVIA_PORT`
    /// - `TRIVIA_PAGE_SIZE`
    /// - `TRIVIA_QUIZ_SEED`
    pub fn from_env() -> TriviaResult<Self> {
        let base = match std::env::var("TRIVIA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> TriviaResult<Self> {
        if let Some(provider) = var("TRIVIA_STORE") {
            self.store.provider = match provider.to_lowercase().as_str() {
                "sqlite" => StoreProvider::Sqlite,
                "memory" => StoreProvider::Memory,
                other => {
                    return Err(TriviaError::Configuration(format!(
                        "Unknown store provider '{}'",
                        other
                    )))
                }
            };
        }

        if let Some(path) = var("TRIVIA_DB_PATH") {
            self.store.path = PathBuf::from(path);
        }

        if let Some(seed) = var("TRIVIA_SEED_CATEGORIES") {
            self.store.seed_default_categories = parse_var("TRIVIA_SEED_CATEGORIES", &seed)?;
        }

        if let Some(host) = var("TRIVIA_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("TRIVIA_PORT") {
            self.server.port = parse_var("TRIVIA_PORT", &port)?;
        }

        if let Some(size) = var("TRIVIA_PAGE_SIZE") {
            self.page_size = parse_var("TRIVIA_PAGE_SIZE", &size)?;
        }

        if let Some(seed) = var("TRIVIA_QUIZ_SEED") {
            self.quiz_seed = Some(parse_var("TRIVIA_QUIZ_SEED", &seed)?);
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> TriviaResult<()> {
        if self.page_size == 0 {
            return Err(TriviaError::Configuration(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Listener address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> TriviaConfigBuilder {
        TriviaConfigBuilder::default()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> TriviaResult<T> {
    value.trim().parse().map_err(|_| {
        TriviaError::Configuration(format!("{} has an invalid value '{}'", name, value))
    })
}

/// Builder for TriviaConfig.
#[derive(Default)]
pub struct TriviaConfigBuilder {
    config: TriviaConfig,
}

impl TriviaConfigBuilder {
    /// Use an in-memory store.
    pub fn in_memory(mut self) -> Self {
        self.config.store.provider = StoreProvider::Memory;
        self
    }

    /// Use a SQLite database at `path`.
    pub fn sqlite_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store.provider = StoreProvider::Sqlite;
        self.config.store.path = path.into();
        self
    }

    pub fn seed_default_categories(mut self, seed: bool) -> Self {
        self.config.store.seed_default_categories = seed;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn quiz_seed(mut self, seed: u64) -> Self {
        self.config.quiz_seed = Some(seed);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TriviaConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TriviaConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.store.provider, StoreProvider::Sqlite);
        assert!(config.store.seed_default_categories);
        assert!(config.store.path.ends_with("trivia.db"));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_env_overrides() {
        let config = TriviaConfig::default()
            .apply_env(lookup(&[
                ("TRIVIA_STORE", "memory"),
                ("TRIVIA_PORT", "8081"),
                ("TRIVIA_PAGE_SIZE", "5"),
                ("TRIVIA_QUIZ_SEED", "99"),
                ("TRIVIA_SEED_CATEGORIES", "false"),
            ]))
            .unwrap();
        assert_eq!(config.store.provider, StoreProvider::Memory);
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.quiz_seed, Some(99));
        assert!(!config.store.seed_default_categories);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        assert!(TriviaConfig::default()
            .apply_env(lookup(&[("TRIVIA_PORT", "eighty")]))
            .is_err());
        assert!(TriviaConfig::default()
            .apply_env(lookup(&[("TRIVIA_STORE", "postgres")]))
            .is_err());
        assert!(TriviaConfig::default()
            .apply_env(lookup(&[("TRIVIA_PAGE_SIZE", "0")]))
            .is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
page_size = 20

[store]
provider = "memory"

[server]
port = 9000
"#
        )
        .unwrap();

        let config = TriviaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.store.provider, StoreProvider::Memory);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "store:\n  provider: sqlite\n  path: /tmp/quiz.db\nquiz_seed: 3").unwrap();

        let config = TriviaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/quiz.db"));
        assert_eq!(config.quiz_seed, Some(3));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = TriviaConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, TriviaError::Configuration(_)));
    }

    #[test]
    fn test_builder() {
        let config = TriviaConfig::builder()
            .in_memory()
            .page_size(3)
            .port(1234)
            .quiz_seed(11)
            .build();
        assert_eq!(config.store.provider, StoreProvider::Memory);
        assert_eq!(config.page_size, 3);
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.quiz_seed, Some(11));
    }
}
