//! # chat-input
//!
//! Keep one conversation, render it for whichever provider you are calling.
//!
//! Each builder owns a system instruction plus the turns that followed, and
//! `render` turns that state into the exact request body the provider
//! expects. Nothing here performs I/O; hand the payload to your HTTP client.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_input::{ChatGptInput, ChatGptOptions, ChatInput};
//!
//! let mut input = ChatGptInput::new("You are helpful.", ChatGptOptions::default())?;
//! input.append_user("What is Rust?");
//!
//! let body = serde_json::to_string(&input.render()).unwrap();
//! assert!(body.contains("\"role\":\"user\""));
//! # Ok::<(), chat_input::ChatInputError>(())
//! ```
//!
//! Hosted deployments resolve model identifiers from a [`PropertyLookup`].
//! [`JsonConfig::shared`] provides the bundled defaults.

pub mod core;
pub mod provider;

pub use crate::core::{
    ChatInput, ChatInputError, ChatRole, Conversation, JsonConfig, Message, MessageHistory,
    PropertyLookup, SystemMessage,
};
pub use provider::{
    ChatGptInput, ChatGptOptions, LlamaInput, LlamaOptions, Provider, ReplicateLlamaInput,
    RequestPayload, SageMakerInput, chat_input,
};
