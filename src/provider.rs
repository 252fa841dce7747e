mod constants;
pub mod llama;
pub mod openai;
pub mod replicate;
pub mod sagemaker;

pub use llama::{LlamaInput, LlamaOptions, LlamaParams, LlamaRequest};
pub use openai::{ChatCompletionRequest, ChatGptInput, ChatGptOptions};
pub use replicate::ReplicateLlamaInput;
pub use sagemaker::{SageMakerInput, SageMakerRequest};

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::core::{ChatInput, ChatInputError, PropertyLookup, SystemMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    /// Raw-prompt Llama with a caller-chosen model.
    Llama,
    Replicate,
    SageMaker,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "OpenAI"),
            Provider::Llama => write!(f, "Llama"),
            Provider::Replicate => write!(f, "Replicate"),
            Provider::SageMaker => write!(f, "SageMaker"),
        }
    }
}

impl FromStr for Provider {
    type Err = ChatInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "llama" => Ok(Provider::Llama),
            "replicate" => Ok(Provider::Replicate),
            "sagemaker" => Ok(Provider::SageMaker),
            _ => Err(ChatInputError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// A rendered request body. Serializes to exactly the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    ChatCompletion(ChatCompletionRequest),
    Llama(LlamaRequest),
    SageMaker(SageMakerRequest),
}

impl RequestPayload {
    pub fn to_value(&self) -> Value {
        // Payloads only contain string-keyed maps, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Build a default-configured conversation for `provider`.
///
/// `config` backs the lookups of hosted deployments; see
/// [`crate::core::JsonConfig::shared`] for the bundled defaults.
pub fn chat_input(
    provider: Provider,
    system: impl Into<SystemMessage>,
    config: Arc<dyn PropertyLookup>,
) -> Result<Box<dyn ChatInput>, ChatInputError> {
    let input: Box<dyn ChatInput> = match provider {
        Provider::OpenAI => Box::new(ChatGptInput::new(system, ChatGptOptions::default())?),
        Provider::Llama => Box::new(LlamaInput::new(system, LlamaOptions::default())?),
        Provider::Replicate => Box::new(ReplicateLlamaInput::new(
            system,
            LlamaOptions::default(),
            config,
        )?),
        Provider::SageMaker => Box::new(SageMakerInput::without_parameters(system)?),
    };
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonConfig;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert_eq!(" SageMaker ".parse::<Provider>().unwrap(), Provider::SageMaker);
        assert_eq!("Replicate".parse::<Provider>().unwrap(), Provider::Replicate);
        assert_eq!(
            "cohere".parse::<Provider>().unwrap_err(),
            ChatInputError::UnsupportedProvider("cohere".to_string())
        );
    }

    #[test]
    fn test_factory_dispatches_on_provider() {
        for provider in [
            Provider::OpenAI,
            Provider::Llama,
            Provider::Replicate,
            Provider::SageMaker,
        ] {
            let input = chat_input(provider, "S", JsonConfig::shared()).unwrap();
            assert_eq!(input.provider(), provider);
        }
    }

    #[test]
    fn test_payload_variant_matches_provider() {
        let config = JsonConfig::shared();
        let openai = chat_input(Provider::OpenAI, "S", config.clone()).unwrap();
        assert!(matches!(openai.render(), RequestPayload::ChatCompletion(_)));

        let replicate = chat_input(Provider::Replicate, "S", config.clone()).unwrap();
        assert!(matches!(replicate.render(), RequestPayload::Llama(_)));

        let sagemaker = chat_input(Provider::SageMaker, "S", config).unwrap();
        assert!(matches!(sagemaker.render(), RequestPayload::SageMaker(_)));
    }
}
