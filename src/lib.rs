//! paperscribe: research paper search, analysis and blog drafting.
//!
//! A linear pipeline:
//! Topic → paper search → selection → LLM analysis → LLM blog post → file
//!
//! # Architecture
//!
//! - **Search**: query building, paper sources and relevance ranking live in
//!   the [`paper_search`] crate
//! - **LLM**: [`llm::TextGenerator`] with an OpenAI-compatible client
//! - **Workflow**: the four steps and the run driver ([`workflow`])
//! - **Output**: blog file naming and writing ([`output`])

pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod output;
pub mod scribe_dirs;
pub mod secret;
pub mod workflow;

pub use config::{LlmConfig, OutputConfig, ScribeConfig};
pub use error::{Result, ScribeError};
pub use graph::PaperGraph;
pub use llm::{LlmError, OpenAiClient, TextGenerator};
pub use paper_search::{Paper, PaperSource, SearchConfig, SearchSource};
pub use secret::ApiKeyRef;
pub use workflow::{Workflow, WorkflowState};
