pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_TEMPERATURE: f64 = 1.0;
    pub const NUMBER_OF_OUTPUTS: u32 = 1;
}

pub mod llama {
    pub const DEFAULT_TEMPERATURE: f64 = 0.5;
    pub const DEFAULT_MAX_NEW_TOKENS: u32 = 500;
    pub const DEFAULT_TOP_P: f64 = 1.0;
    pub const DEFAULT_REPETITION_PENALTY: f64 = 1.0;
    pub const USER_PREFIX: &str = "User: ";
    pub const ASSISTANT_PREFIX: &str = "Assistant: ";
}

pub mod replicate {
    pub const DEFAULT_MODEL_KEY: &str = "models.replicate.llama.13b";

    pub fn version_key(model: &str) -> String {
        format!("models.replicate.llama.{model}-version")
    }
}
