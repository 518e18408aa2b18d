//! Implementations of the text generation capability.

mod openai;

pub use openai::OpenAIClient;
