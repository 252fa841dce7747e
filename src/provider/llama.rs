use serde::Serialize;
use tracing::warn;

use crate::core::{ChatInput, ChatInputError, SystemMessage};

use super::{Provider, RequestPayload, constants::llama};

/// Options for instruction-tuned Llama deployments that take a raw prompt.
/// Zero and empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlamaOptions {
    pub model: Option<String>,
    pub version: Option<String>,
    pub temperature: Option<f64>,
    /// Rendered as `max_new_tokens`.
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
    /// Seed transcript, continued by later appends.
    pub prompt: Option<String>,
    pub repetition_penalty: Option<f64>,
    pub debug: Option<bool>,
}

impl LlamaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_repetition_penalty(mut self, repetition_penalty: f64) -> Self {
        self.repetition_penalty = Some(repetition_penalty);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct LlamaParams {
    pub model: String,
    /// Deployment version. Only hosted deployments render it.
    pub version: String,
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub debug: bool,
}

impl From<&LlamaOptions> for LlamaParams {
    fn from(options: &LlamaOptions) -> Self {
        let non_zero =
            |value: Option<f64>, default: f64| value.filter(|v| *v != 0.0).unwrap_or(default);
        Self {
            model: options.model.clone().unwrap_or_default(),
            version: options.version.clone().unwrap_or_default(),
            temperature: non_zero(options.temperature, llama::DEFAULT_TEMPERATURE),
            max_new_tokens: options
                .max_tokens
                .filter(|max| *max != 0)
                .unwrap_or(llama::DEFAULT_MAX_NEW_TOKENS),
            top_p: non_zero(options.top_p, llama::DEFAULT_TOP_P),
            repetition_penalty: non_zero(
                options.repetition_penalty,
                llama::DEFAULT_REPETITION_PENALTY,
            ),
            debug: options.debug.unwrap_or(false),
        }
    }
}

/// Flat transcript conversation: alternating `User:` / `Assistant:` lines
/// under a separate system prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct LlamaInput {
    pub params: LlamaParams,
    system_prompt: String,
    prompt: String,
}

impl LlamaInput {
    pub fn new(
        system: impl Into<SystemMessage>,
        options: LlamaOptions,
    ) -> Result<Self, ChatInputError> {
        let system_prompt = system.into().into_message()?.content().to_string();

        if options.model.as_deref().is_none_or(str::is_empty) {
            warn!(
                "no model name given; set one or use a hosted variant such as ReplicateLlamaInput"
            );
        }

        Ok(Self {
            params: LlamaParams::from(&options),
            system_prompt,
            prompt: options.prompt.unwrap_or_default(),
        })
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    fn append_line(&mut self, prefix: &str, text: &str) {
        if !self.prompt.is_empty() {
            self.prompt.push('\n');
        }
        self.prompt.push_str(prefix);
        self.prompt.push_str(text);
    }

    pub(crate) fn prompt_input(&self) -> PromptInput {
        PromptInput {
            prompt: self.prompt.clone(),
            system_prompt: self.system_prompt.clone(),
            max_new_tokens: self.params.max_new_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            repetition_penalty: self.params.repetition_penalty,
            debug: self.params.debug,
        }
    }

    pub fn to_request(&self) -> LlamaRequest {
        LlamaRequest {
            model: self.params.model.clone(),
            input_data: LlamaInputData {
                version: None,
                input: self.prompt_input(),
            },
        }
    }
}

impl ChatInput for LlamaInput {
    fn append_user(&mut self, text: &str) {
        self.append_line(llama::USER_PREFIX, text);
    }

    fn append_assistant(&mut self, text: &str) {
        self.append_line(llama::ASSISTANT_PREFIX, text);
    }

    fn reset(&mut self) {
        self.prompt.clear();
    }

    fn render(&self) -> RequestPayload {
        RequestPayload::Llama(self.to_request())
    }

    fn provider(&self) -> Provider {
        Provider::Llama
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlamaRequest {
    pub model: String,

    #[serde(rename = "inputData")]
    pub input_data: LlamaInputData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlamaInputData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub input: PromptInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptInput {
    pub prompt: String,
    pub system_prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Default)]
    struct MessageVisitor {
        message: String,
    }

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            }
        }
    }

    /// Collects "[LEVEL] message" lines.
    #[derive(Clone, Default)]
    struct CapturedLines(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for CapturedLines {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            let line = format!("[{}] {}", event.metadata().level(), visitor.message);
            self.0.lock().unwrap().push(line);
        }
    }

    fn captured_logs(f: impl FnOnce()) -> Vec<String> {
        let captured = CapturedLines::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        tracing::subscriber::with_default(subscriber, f);
        let lines = captured.0.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_transcript_and_render_shape() {
        let mut input = LlamaInput::new("S", LlamaOptions::new().with_model("llama-2")).unwrap();
        assert_eq!(input.prompt(), "");

        input.append_user("U");
        input.append_assistant("A");
        assert_eq!(input.prompt(), "User: U\nAssistant: A");

        assert_eq!(
            input.render().to_value(),
            json!({
                "model": "llama-2",
                "inputData": {
                    "input": {
                        "prompt": "User: U\nAssistant: A",
                        "system_prompt": "S",
                        "max_new_tokens": 500,
                        "temperature": 0.5,
                        "top_p": 1.0,
                        "repetition_penalty": 1.0,
                        "debug": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_reset_keeps_system_prompt() {
        let mut input =
            LlamaInput::new(Message::system("S"), LlamaOptions::new().with_model("m")).unwrap();
        input.append_user("U");
        input.reset();
        input.reset();
        assert_eq!(input.prompt(), "");
        assert_eq!(input.system_prompt(), "S");

        input.append_assistant("A");
        assert_eq!(input.prompt(), "Assistant: A");
    }

    #[test]
    fn test_seeded_prompt_and_options() {
        let mut input = LlamaInput::new(
            "S",
            LlamaOptions::new()
                .with_model("m")
                .with_prompt("User: earlier")
                .with_max_tokens(128)
                .with_temperature(0.0)
                .with_top_p(0.9)
                .with_repetition_penalty(1.2)
                .with_debug(true),
        )
        .unwrap();
        input.append_user("now");

        let request = input.to_request();
        assert_eq!(request.input_data.input.prompt, "User: earlier\nUser: now");
        assert_eq!(request.input_data.input.max_new_tokens, 128);
        assert_eq!(request.input_data.input.temperature, 0.5);
        assert_eq!(request.input_data.input.top_p, 0.9);
        assert_eq!(request.input_data.input.repetition_penalty, 1.2);
        assert!(request.input_data.input.debug);
        assert!(request.input_data.version.is_none());
    }

    #[test]
    fn test_rejects_non_system_message() {
        let err = LlamaInput::new(Message::assistant("S"), LlamaOptions::default()).unwrap_err();
        assert!(matches!(err, ChatInputError::InvalidSystemMessage(_)));
    }

    #[test]
    fn test_missing_model_warns_but_builds() {
        let mut built = None;
        let logs = captured_logs(|| {
            built = Some(LlamaInput::new("S", LlamaOptions::default()));
        });
        let input = built.unwrap().unwrap();
        assert_eq!(input.params.model, "");
        assert!(
            logs.iter()
                .any(|line| line.starts_with("[WARN]") && line.contains("no model name given"))
        );

        let logs = captured_logs(|| {
            LlamaInput::new("S", LlamaOptions::new().with_model("m")).unwrap();
        });
        assert!(!logs.iter().any(|line| line.contains("no model name given")));
    }
}
