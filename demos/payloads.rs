use chat_input::{
    ChatGptInput, ChatGptOptions, ChatInput, ChatInputError, JsonConfig, LlamaOptions,
    Message, MessageHistory, ReplicateLlamaInput, SageMakerInput,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ChatInputError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "chat_input=debug".into()),
        )
        .init();

    let system = "You are a concise assistant.";

    let mut openai = ChatGptInput::new(system, ChatGptOptions::new().with_max_tokens(256))?;
    let mut replicate =
        ReplicateLlamaInput::new(system, LlamaOptions::default(), JsonConfig::shared())?;
    let mut sagemaker =
        SageMakerInput::new(system, json!({"max_new_tokens": 256, "top_p": 0.9}))?;

    for input in [&mut openai as &mut dyn ChatInput, &mut replicate, &mut sagemaker] {
        input.append_user("Explain ownership in one sentence.");
        input.append_assistant("Every value has a single owner that frees it.");
        input.append_user("And borrowing?");
    }

    // Take back the last question on the turn-sequence builders.
    openai.remove_last(&Message::user("And borrowing?"));
    sagemaker.remove_last(&Message::user("And borrowing?"));

    for input in [&openai as &dyn ChatInput, &replicate, &sagemaker] {
        let body = serde_json::to_string_pretty(&input.render())
            .map_err(|e| ChatInputError::Configuration(e.to_string()))?;
        println!("--- {} ---\n{body}", input.provider());
    }

    Ok(())
}
