pub mod config;
pub mod conversation;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{JsonConfig, PropertyLookup};
pub use conversation::Conversation;
pub use error::ChatInputError;
pub use traits::{ChatInput, MessageHistory};
pub use types::{ChatRole, Message, SystemMessage};
