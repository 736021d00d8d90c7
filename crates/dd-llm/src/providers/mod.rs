//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! chat-completion services.

pub mod openai;

pub use openai::{OpenAIConfig, OpenAIProvider};
