//! spendwise-cli: sessions, question answering and local settings for the `spendwise` binary

pub mod assistant;
pub mod auth;
pub mod config;
pub mod llm;
pub mod service;
pub mod session;
pub mod state;

pub use assistant::{DatasetSnapshot, LlmAnswerer, QuestionAnswerer};
pub use service::{chat, upload, ChatResponse, UploadResponse};
pub use session::{Session, SessionId, SessionStore};
