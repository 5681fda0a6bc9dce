//! evh-oi-llm — LLM backend abstraction for the document analysis and
//! document chat endpoints: backends, prompt templates, SSE decoding and
//! the audit log.

pub mod backend;
pub mod prompts;
pub mod nda;
pub mod sse;
pub mod audit;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, TextStream};
pub use sse::ChatStreamAccumulator;
