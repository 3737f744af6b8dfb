pub mod config;
pub mod content;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod server;

pub use config::{Config, GeminiConfig};
pub use error::{GeminiError, Result};
pub use gemini::{GeminiClient, TextClient, TextGenerator};
pub use models::*;
