//! Connection settings for the synthesis service.

use std::env;
use std::time::Duration;

/// Which API shape the service speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// POST `{base}/chat/completions`, with the JSON discipline carried in a
    /// system message.
    #[default]
    Chat,
    /// POST `{base}/completions`, with a bare prompt.
    Completion,
}

/// Everything needed to reach an OpenAI-style endpoint.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Base URL up to the API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model identifier passed through to the service.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion budget per request.
    pub max_tokens: u32,
    /// Hard cap on a single round-trip. The game loop blocks on every
    /// request, so this is the only thing standing between a wedged service
    /// and a wedged game.
    pub timeout: Duration,
    /// Bearer token, if the service wants one.
    pub api_key: Option<String>,
    /// API shape to use.
    pub backend: Backend,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout: Duration::from_secs(120),
            api_key: None,
            backend: Backend::default(),
        }
    }
}

impl SynthConfig {
    /// Default settings, with the bearer token read from `NEBEL_API_KEY` or,
    /// failing that, `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        let api_key = env::var("NEBEL_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let config = SynthConfig::default();
        assert_eq!(config.backend, Backend::Chat);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_tokens, 2000);
        assert!(config.api_key.is_none());
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    }
}
