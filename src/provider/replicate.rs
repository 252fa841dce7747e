use std::sync::Arc;

use tracing::debug;

use crate::core::{ChatInput, ChatInputError, PropertyLookup, SystemMessage};

use super::{
    Provider, RequestPayload,
    constants::replicate,
    llama::{LlamaInput, LlamaInputData, LlamaOptions, LlamaParams, LlamaRequest},
};

/// Llama hosted on Replicate. The model defaults to the configured small
/// chat model, and the deployment version is looked up from the model name
/// at render time when none was given.
#[derive(Clone)]
pub struct ReplicateLlamaInput {
    llama: LlamaInput,
    config: Arc<dyn PropertyLookup>,
}

impl std::fmt::Debug for ReplicateLlamaInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicateLlamaInput")
            .field("llama", &self.llama)
            .finish_non_exhaustive()
    }
}

impl ReplicateLlamaInput {
    pub fn new(
        system: impl Into<SystemMessage>,
        mut options: LlamaOptions,
        config: Arc<dyn PropertyLookup>,
    ) -> Result<Self, ChatInputError> {
        if options.model.as_deref().is_none_or(str::is_empty) {
            options.model = config.get_property(replicate::DEFAULT_MODEL_KEY);
            debug!(model = ?options.model, "resolved default replicate model");
        }

        Ok(Self {
            llama: LlamaInput::new(system, options)?,
            config,
        })
    }

    pub fn params(&self) -> &LlamaParams {
        &self.llama.params
    }

    pub fn params_mut(&mut self) -> &mut LlamaParams {
        &mut self.llama.params
    }

    pub fn system_prompt(&self) -> &str {
        self.llama.system_prompt()
    }

    pub fn prompt(&self) -> &str {
        self.llama.prompt()
    }

    /// The explicit version if set, otherwise the configured version for the
    /// current model. `None` when the configuration has no entry.
    pub fn resolved_version(&self) -> Option<String> {
        let params = self.params();
        if !params.version.is_empty() {
            return Some(params.version.clone());
        }

        let key = replicate::version_key(&params.model);
        let version = self
            .config
            .get_property(&key)
            .filter(|version| !version.is_empty());
        if version.is_none() {
            debug!(%key, "no deployment version configured, omitting version");
        }
        version
    }

    pub fn to_request(&self) -> LlamaRequest {
        LlamaRequest {
            model: self.params().model.clone(),
            input_data: LlamaInputData {
                version: self.resolved_version(),
                input: self.llama.prompt_input(),
            },
        }
    }
}

impl ChatInput for ReplicateLlamaInput {
    fn append_user(&mut self, text: &str) {
        self.llama.append_user(text);
    }

    fn append_assistant(&mut self, text: &str) {
        self.llama.append_assistant(text);
    }

    fn reset(&mut self) {
        self.llama.reset();
    }

    fn render(&self) -> RequestPayload {
        RequestPayload::Llama(self.to_request())
    }

    fn provider(&self) -> Provider {
        Provider::Replicate
    }
}
