//! The synthesis client: one prompt in, one parsed JSON object out.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{Value, json};
use tracing::debug;

use crate::config::{Backend, SynthConfig};
use crate::error::{SynthError, SynthResult};
use crate::prompt::dedent;
use crate::repair::parse_object;

/// System message for the chat backend. The completion backend gets the
/// same discipline appended to the prompt instead.
const JSON_DISCIPLINE: &str = "Respond only with strict JSON, no indentation.";

/// A source of synthesized JSON fragments.
///
/// One call is one round-trip; there is no retry and no streaming. The
/// pipeline drives everything through this trait so tests can script
/// responses without a network.
pub trait Synthesizer {
    /// Sends one prompt and returns the JSON object the service produced.
    fn synthesize(&self, prompt: &str) -> SynthResult<Value>;
}

impl<T: Synthesizer + ?Sized> Synthesizer for &T {
    fn synthesize(&self, prompt: &str) -> SynthResult<Value> {
        (**self).synthesize(prompt)
    }
}

/// Talks to an OpenAI-style HTTP endpoint with blocking requests.
///
/// The game loop is strictly synchronous and turn-based, so a blocking
/// client is the honest shape; the timeout in [`SynthConfig`] keeps a
/// wedged service from hanging the loop forever.
pub struct HttpSynthesizer {
    config: SynthConfig,
    client: reqwest::blocking::Client,
}

impl HttpSynthesizer {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: SynthConfig) -> SynthResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn chat(&self, prompt: &str) -> SynthResult<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": JSON_DISCIPLINE},
                {"role": "user", "content": prompt},
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });
        let response = self.post(&url, &body)?;
        extract_text(&response, "/choices/0/message/content")
    }

    fn completion(&self, prompt: &str) -> SynthResult<String> {
        let url = format!("{}/completions", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.config.model,
            "prompt": format!("{prompt}\n\n{JSON_DISCIPLINE}"),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });
        let response = self.post(&url, &body)?;
        extract_text(&response, "/choices/0/text")
    }

    fn post(&self, url: &str, body: &Value) -> SynthResult<Value> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response.json()?)
    }
}

impl Synthesizer for HttpSynthesizer {
    fn synthesize(&self, prompt: &str) -> SynthResult<Value> {
        let prompt = dedent(prompt);
        debug!(
            backend = ?self.config.backend,
            prompt_chars = prompt.len(),
            "sending synthesis request"
        );
        let raw = match self.config.backend {
            Backend::Chat => self.chat(&prompt)?,
            Backend::Completion => self.completion(&prompt)?,
        };
        parse_object(&raw)
    }
}

/// Pull the generated text out of a completion-API response body.
fn extract_text(response: &Value, pointer: &str) -> SynthResult<String> {
    response
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SynthError::Parse {
            reason: format!("response body has no string at {pointer}"),
            raw: response.to_string(),
        })
}

/// A canned-response synthesizer for tests and offline dry runs.
///
/// Responses are handed out in order and every prompt is recorded, so a
/// test can assert both what was asked and how often. Running past the end
/// of the script yields a parse error rather than a panic.
#[derive(Debug, Default)]
pub struct ScriptedSynthesizer {
    responses: RefCell<VecDeque<Value>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedSynthesizer {
    /// A script that answers with the given values, first to last.
    pub fn new(responses: impl IntoIterator<Item = Value>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// How many times `synthesize` has been called.
    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Synthesizer for ScriptedSynthesizer {
    fn synthesize(&self, prompt: &str) -> SynthResult<Value> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| SynthError::Parse {
                reason: "scripted synthesizer ran out of responses".to_string(),
                raw: String::new(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_follows_the_chat_shape() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}]
        });
        let text = extract_text(&response, "/choices/0/message/content").unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[test]
    fn extract_text_follows_the_completion_shape() {
        let response = json!({"choices": [{"text": "{\"a\": 1}"}]});
        let text = extract_text(&response, "/choices/0/text").unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[test]
    fn extract_text_reports_the_body_it_could_not_read() {
        let response = json!({"error": {"message": "model overloaded"}});
        let err = extract_text(&response, "/choices/0/text").unwrap_err();
        match err {
            SynthError::Parse { raw, .. } => assert!(raw.contains("model overloaded")),
            other => panic!("expected a parse error, got {other}"),
        }
    }

    #[test]
    fn scripted_synthesizer_replays_in_order_and_records_prompts() {
        let scripted =
            ScriptedSynthesizer::new([json!({"name": "lantern"}), json!({"name": "key"})]);
        assert_eq!(scripted.synthesize("first").unwrap()["name"], "lantern");
        assert_eq!(scripted.synthesize("second").unwrap()["name"], "key");
        assert_eq!(scripted.calls(), 2);
        assert_eq!(scripted.prompts(), vec!["first", "second"]);
    }

    #[test]
    fn scripted_synthesizer_errors_when_the_script_runs_out() {
        let scripted = ScriptedSynthesizer::new([]);
        let err = scripted.synthesize("anything").unwrap_err();
        assert!(matches!(err, SynthError::Parse { .. }));
    }
}
