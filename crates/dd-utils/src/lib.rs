//! Shared utilities for the due-diligence workspace
//!
//! This crate provides common functionality used by the server and CLI,
//! including logging setup and environment lookups.

pub mod config;
pub mod logging;

pub use config::{env_or, env_parse};
pub use logging::{init_tracing, init_tracing_with};
