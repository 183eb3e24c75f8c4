//! Generative service clients.

pub mod openai_api_agent;

pub use openai_api_agent::OpenAIApiAgent;
