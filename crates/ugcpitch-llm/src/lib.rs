//! Client for the text-generation service behind the pitch pipeline.
//!
//! [`AnthropicClient`] talks to the Messages API; [`TextGenerator`] is the
//! seam the pipeline depends on so tests can swap in [`ScriptedGenerator`].

pub mod client;
pub mod error;
pub mod generator;
pub mod mock;
pub mod types;

pub use client::AnthropicClient;
pub use error::LlmError;
pub use generator::TextGenerator;
pub use mock::{RecordedCall, ScriptedGenerator};
pub use types::{ContentBlock, MessagesRequest, MessagesResponse};
