use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub generation: GenerationConfig,
    pub data: DataConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

/// OpenAI client configuration. The API key is never stored here;
/// it is read from `OPENAI_API_KEY` at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Request timeout in seconds for the provider client.
    pub timeout_secs: u64,
}

/// Pipeline limits and resource file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Ceiling on the batch size requested from the provider.
    pub max_gen_count: usize,
    /// Ceiling on the number of cards served by a single draw.
    pub max_draw_count: usize,
    /// Directory holding the plain-text resources below.
    pub resource_dir: PathBuf,
    pub prompt_template_file: String,
    pub profanity_list_file: String,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (holds the SQLite file).
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            openai: OpenAiConfig::default(),
            generation: GenerationConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            // Expo dev-server origins used by the companion app.
            allowed_origins: vec![
                "http://localhost:19006".to_string(),
                "http://127.0.0.1:19006".to_string(),
                "http://10.0.2.2:19006".to_string(),
            ],
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_output_tokens: 16384,
            timeout_secs: 60,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_gen_count: 50,
            max_draw_count: 100,
            resource_dir: PathBuf::from("resources"),
            prompt_template_file: "card_prompt.txt".to_string(),
            profanity_list_file: "filter_profanity_list.txt".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` in the working directory,
    /// falling back to `~/.config/cardsmith/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let local = PathBuf::from("config.toml");
        let path = if local.exists() { local } else { Self::config_path() };
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!("No config file at {} — using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("cardsmith"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("cardsmith").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.max_gen_count, 50);
        assert_eq!(config.generation.max_draw_count, 100);
        assert_eq!(config.openai.timeout_secs, 60);
        assert!(config.data.data_dir.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        // Should return defaults without panicking
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.generation.max_gen_count, 50);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str("[generation]\nmax_gen_count = 10\n").unwrap();
        assert_eq!(config.generation.max_gen_count, 10);
        assert_eq!(config.generation.max_draw_count, 100);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.openai.model, config.openai.model);
        assert_eq!(deserialized.server.allowed_origins, config.server.allowed_origins);
    }
}
