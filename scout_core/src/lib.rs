// src/lib.rs
//! Client-side search orchestration.
//!
//! `scout_core` coordinates a remote AI search backend: one query produces
//! alternative query rewrites, web results, video results, and a separately
//! fetched ranked consolidation. [`SearchOrchestrator`] owns the resulting
//! [`OrchestrationState`] and keeps it consistent with the query in flight;
//! presentation layers subscribe to it and render.
pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod orchestrator;
pub mod state;
pub mod types;

pub use backend::{HttpBackend, SearchBackend};
pub use config::{ClientConfig, ConfigStore};
pub use error::{BackendError, ConfigError, FALLBACK_ERROR_MESSAGE};
pub use input::{Key, QueryInput, Trigger};
pub use orchestrator::{CycleHandle, RankedOutcome, SearchOrchestrator, SearchOutcome};
pub use state::{OrchestrationState, Phase};
pub use types::{AskAiResponse, Query, RankedResultItem, SearchResultItem, VideoResultItem};
