use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where durable state lives (preferences, material bytes).
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Base directory for preference files and the material vault.
    /// Default: "data".
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "data".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Local Python interpreter used to execute student code.
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Interpreter executable. Default: "python3".
    #[serde(default = "default_python_bin")]
    pub python_bin: String,
}

fn default_python_bin() -> String {
    "python3".into()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            python_bin: default_python_bin(),
        }
    }
}

/// Generative-AI service used for feedback and explanations.
#[derive(Debug, Deserialize, Clone)]
pub struct TutorConfig {
    /// Service endpoint base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// API key; feedback features are disabled when empty.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier. Default: "gemini-2.5-flash".
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_model(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub tutor: TutorConfig,
}

impl AppConfig {
    /// Load from the `PYSTUDY_CONFIG` path (default `config/pystudy`).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PYSTUDY_CONFIG").unwrap_or_else(|_| "config/pystudy".to_string());
        Self::load_from(&config_path)
    }

    /// Load from an explicit file base path. The file may be absent;
    /// defaults and `PYSTUDY__*` environment overrides still apply.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("storage.data_dir", "data")?
            .set_default("runner.python_bin", "python3")?
            .set_default("tutor.api_base", "https://generativelanguage.googleapis.com")?
            .set_default("tutor.api_key", "")?
            .set_default("tutor.model", "gemini-2.5-flash")?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., PYSTUDY__TUTOR__API_KEY)
            .add_source(Environment::with_prefix("PYSTUDY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
