//! Provider abstractions for the external services
//!
//! Trait seams let the server run against real SaaS backends while tests
//! substitute in-process fakes.

pub mod chat_completions;
pub mod cloudinary;
pub mod llm;
pub mod object_store;

pub use chat_completions::ChatCompletionsClient;
pub use cloudinary::CloudinaryStore;
pub use llm::{CompletionRequest, LlmProvider};
pub use object_store::{ObjectStoreProvider, ResourceType};
