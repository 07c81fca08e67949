pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;

pub use backend::{ChatCompletionsClient, GenerationBackend};
pub use catalog::ModelSelector;
pub use config::GatewayConfig;
pub use error::{ErrorBody, GatewayError, Result};
pub use gateway::Gateway;
pub use models::*;
