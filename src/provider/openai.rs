use serde::Serialize;

use crate::core::{
    ChatInput, ChatInputError, ChatRole, Conversation, Message, MessageHistory, SystemMessage,
};

use super::{Provider, RequestPayload, constants::openai};

/// Rendering options for [`ChatGptInput`]. Zero and empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatGptOptions {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ChatGptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
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
}

/// Chat-completion conversation: `{model, messages, temperature, n, max_tokens}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatGptInput {
    conversation: Conversation,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    number_of_outputs: u32,
}

impl ChatGptInput {
    pub fn new(
        system: impl Into<SystemMessage>,
        options: ChatGptOptions,
    ) -> Result<Self, ChatInputError> {
        Ok(Self {
            conversation: Conversation::new(system)?,
            model: options
                .model
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
            temperature: options
                .temperature
                .filter(|t| *t != 0.0)
                .unwrap_or(openai::DEFAULT_TEMPERATURE),
            max_tokens: options.max_tokens,
            number_of_outputs: openai::NUMBER_OF_OUTPUTS,
        })
    }

    pub fn number_of_outputs(&self) -> u32 {
        self.number_of_outputs
    }

    pub fn to_request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: self
                .conversation
                .messages()
                .iter()
                .map(ChatCompletionMessage::from)
                .collect(),
            temperature: Some(self.temperature).filter(|t| *t != 0.0),
            n: Some(self.number_of_outputs).filter(|n| *n != 0),
            max_tokens: self.max_tokens.filter(|max| *max != 0),
        }
    }
}

impl ChatInput for ChatGptInput {
    fn append_user(&mut self, text: &str) {
        self.conversation.push(Message::user(text));
    }

    fn append_assistant(&mut self, text: &str) {
        self.conversation.push(Message::assistant(text));
    }

    fn reset(&mut self) {
        self.conversation.reset();
    }

    fn render(&self) -> RequestPayload {
        RequestPayload::ChatCompletion(self.to_request())
    }

    fn provider(&self) -> Provider {
        Provider::OpenAI
    }
}

impl MessageHistory for ChatGptInput {
    fn append_message(&mut self, message: Message) {
        self.conversation.push(message);
    }

    fn remove_last(&mut self, message: &Message) -> bool {
        self.conversation.remove_last(message)
    }

    fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    pub messages: Vec<ChatCompletionMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionMessage {
    pub role: ChatRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub content: String,
}

impl From<&Message> for ChatCompletionMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            name: message.name().map(str::to_string),
            content: message.content().to_string(),
        }
    }
}
