use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use relay::providers::configs::{OpenAiProviderConfig, OPENAI_HOST, OPENAI_MODEL};
use relay::tools::client::DEFAULT_TOOLS_ENDPOINT;
use relay::tools::ToolClientConfig;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_openai_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderSettings {
    // Convert to the relay provider config; the credential is required here
    pub fn into_config(self) -> Result<OpenAiProviderConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar {
                env_var: to_env_var("provider.api_key"),
            })?;

        Ok(OpenAiProviderConfig {
            host: self.host,
            api_key,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ToolsSettings {
    #[serde(default = "default_tools_endpoint")]
    pub endpoint: String,
}

impl ToolsSettings {
    pub fn into_config(self) -> ToolClientConfig {
        ToolClientConfig {
            endpoint: self.endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub tools: ToolsSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load()
    }

    fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Provider defaults
            .set_default("provider.host", default_openai_host())?
            .set_default("provider.model", default_model())?
            // Tool endpoint defaults
            .set_default("tools.endpoint", default_tools_endpoint())?;

        // The conventional OpenAI variable works too, but RELAY_* wins
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            builder = builder.set_default("provider.api_key", api_key)?;
        }

        let config = builder
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })
    }
}

fn default_model() -> String {
    OPENAI_MODEL.to_string()
}

fn default_openai_host() -> String {
    OPENAI_HOST.to_string()
}

fn default_tools_endpoint() -> String {
    DEFAULT_TOOLS_ENDPOINT.to_string()
}
