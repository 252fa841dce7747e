use serde::Serialize;
use serde_json::Value;

use super::error::ChatInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation. A message is never mutated once built; a
/// conversation only ever appends or removes whole messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    content: String,
    role: ChatRole,
    name: Option<String>,
}

impl Message {
    pub fn new(content: impl Into<String>, role: ChatRole) -> Self {
        Self {
            content: content.into(),
            role,
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(content, ChatRole::System)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, ChatRole::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, ChatRole::Assistant)
    }

    /// Attach a participant name. Empty names are treated as absent.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_system_role(&self) -> bool {
        self.role == ChatRole::System
    }

    /// Value equality on role and content, ignoring the name.
    pub(crate) fn same_utterance(&self, other: &Message) -> bool {
        self.role == other.role && self.content == other.content
    }
}

/// The instruction a builder is constructed with: either raw text or an
/// already built system-role message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMessage {
    Text(String),
    Message(Message),
}

impl SystemMessage {
    /// Validate and normalize into a system-role message.
    pub fn into_message(self) -> Result<Message, ChatInputError> {
        match self {
            SystemMessage::Text(text) => Ok(Message::system(text)),
            SystemMessage::Message(message) if message.is_system_role() => Ok(message),
            SystemMessage::Message(message) => Err(ChatInputError::InvalidSystemMessage(format!(
                "expected a system message to define the chatbot instructions, got role `{}`",
                message.role()
            ))),
        }
    }
}

impl From<&str> for SystemMessage {
    fn from(value: &str) -> Self {
        SystemMessage::Text(value.to_string())
    }
}

impl From<String> for SystemMessage {
    fn from(value: String) -> Self {
        SystemMessage::Text(value)
    }
}

impl From<Message> for SystemMessage {
    fn from(value: Message) -> Self {
        SystemMessage::Message(value)
    }
}

/// Accepts a JSON string, or an object shaped `{"role": "system", "content": ..}`
/// with an optional `name`. Anything else is rejected.
impl TryFrom<Value> for SystemMessage {
    type Error = ChatInputError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(SystemMessage::Text(text)),
            Value::Object(map) => {
                let role = map.get("role").and_then(Value::as_str);
                let content = map.get("content").and_then(Value::as_str);
                match (role, content) {
                    (Some("system"), Some(content)) => {
                        let mut message = Message::system(content);
                        if let Some(name) = map.get("name").and_then(Value::as_str) {
                            message = message.with_name(name);
                        }
                        Ok(SystemMessage::Message(message))
                    }
                    _ => Err(ChatInputError::InvalidSystemMessage(
                        "object is not a system-role message".to_string(),
                    )),
                }
            }
            other => Err(ChatInputError::InvalidSystemMessage(format!(
                "expected a string or a system message, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
