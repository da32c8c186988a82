use std::time::Duration;

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4";

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    /// Request timeout; unset leaves the HTTP client without one
    pub timeout: Option<Duration>,
}

impl OpenAiProviderConfig {
    /// Config for the public OpenAI endpoint with the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }
}
