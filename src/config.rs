use serde::{Deserialize, Serialize};

/// Environment variable holding the TMDB API key. Loaded from the real
/// environment or an `.env` file read by the binary at startup.
pub const API_KEY_VAR: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_port() -> String {
    "5000".to_string()
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Read the YAML config file. A missing file means defaults: API on
    /// port 5000, no app shell directory.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(ConfigError::ReadError(path.to_string(), e)),
        };

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// The credential every outbound call needs. No route can work
    /// without it, so startup stops here when it is missing or empty.
    pub fn api_key_from_env() -> Result<String, ConfigError> {
        match std::env::var(API_KEY_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("TMDB_API_KEY is not set; add it to the environment or an .env file")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file("no-such-file.yaml").unwrap();
        assert_eq!(config.listen.port, "5000");
        assert!(config.listen.address.is_none());
        assert!(config.appdir.is_none());
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.timeout_secs, 30);
    }

    #[test]
    fn partial_yaml_keeps_defaults_elsewhere() {
        let yaml = "listen:\n  port: \"8080\"\nappdir: ./webapp\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen.port, "8080");
        assert!(config.listen.address.is_none());
        assert_eq!(config.appdir.as_deref(), Some("./webapp"));
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn tmdb_base_url_is_overridable() {
        let yaml = "tmdb:\n  base_url: http://127.0.0.1:9999\n  timeout_secs: 5\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tmdb.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.tmdb.timeout_secs, 5);
    }

    // The only test touching the process environment; nothing else in
    // this test binary reads the key. All three cases run sequentially
    // here so parallel tests never race on the variable.
    #[test]
    fn api_key_comes_from_env_or_fails() {
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(
            Config::api_key_from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var(API_KEY_VAR, "   ");
        assert!(matches!(
            Config::api_key_from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var(API_KEY_VAR, "  from-env  ");
        let key = Config::api_key_from_env().unwrap();
        assert_eq!(key, "from-env");
        std::env::remove_var(API_KEY_VAR);
    }
}
