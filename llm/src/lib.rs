#![deny(clippy::style)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Client for hosted Llama deployments that speak the chat-completions
//! protocol.

pub mod chat;
pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use chat::{Message, Role};
pub use client::{Config, LlamaClient, API_VERSION, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use request::{Sampling, SamplingBuilder, SamplingBuilderError};
pub use response::Completion;
