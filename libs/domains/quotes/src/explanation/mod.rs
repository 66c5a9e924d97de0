mod openai;
mod provider;

pub use openai::{DEFAULT_CHAT_MODEL, OpenAIChatConfig, OpenAIChatProvider};
pub use provider::ExplanationProvider;

#[cfg(test)]
pub use provider::MockExplanationProvider;
