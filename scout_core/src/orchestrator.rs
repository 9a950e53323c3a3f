//! Query orchestration.
//!
//! A search cycle runs in two stages:
//!
//! 1. **Primary stage**: `ask-ai` yields alternative queries, web results and
//!    video results. `loading` is true exactly while this request is in flight.
//!    A failure is shown to the user and ends the cycle.
//! 2. **Ranked stage**: issued only after the primary stage succeeded, as a
//!    spawned task. It may settle after `loading` has already dropped; its
//!    failure is logged and otherwise ignored.
//!
//! State is published through a `tokio::sync::watch` channel so any number of
//! renderers can observe it without being able to mutate it.
//!
//! # Example
//!
//! ```ignore
//! use scout_core::{ClientConfig, HttpBackend, SearchOrchestrator, SearchOutcome};
//!
//! let backend = HttpBackend::new(&ClientConfig::default())?;
//! let orchestrator = SearchOrchestrator::new(backend);
//! let mut updates = orchestrator.subscribe();
//!
//! if let SearchOutcome::Completed(cycle) = orchestrator.run_search("climate change").await {
//!     cycle.ranked_settled().await;
//! }
//! println!("{:?}", orchestrator.snapshot());
//! ```

use crate::backend::SearchBackend;
use crate::input::Trigger;
use crate::state::OrchestrationState;
use crate::types::Query;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// How a call to [`SearchOrchestrator::run_search`] ended.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Blank query; nothing was sent and state is untouched
    Skipped,
    /// A primary request was already in flight when the submit arrived
    Busy,
    /// Primary stage succeeded; the ranked stage is running
    Completed(CycleHandle),
    /// Primary stage failed with the user-visible `message`
    Failed { generation: u64, message: String },
    /// A newer cycle started before this one's primary request settled
    Superseded { generation: u64 },
}

impl SearchOutcome {
    pub fn generation(&self) -> Option<u64> {
        match self {
            SearchOutcome::Skipped | SearchOutcome::Busy => None,
            SearchOutcome::Completed(cycle) => Some(cycle.generation),
            SearchOutcome::Failed { generation, .. } | SearchOutcome::Superseded { generation } => {
                Some(*generation)
            }
        }
    }

    pub fn into_cycle(self) -> Option<CycleHandle> {
        match self {
            SearchOutcome::Completed(cycle) => Some(cycle),
            _ => None,
        }
    }
}

/// How the ranked stage of a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankedOutcome {
    /// Ranked results were published (count)
    Applied(usize),
    /// The request failed; state kept its primary results
    Failed,
    /// The request settled, successfully or not, after a newer cycle began
    /// and its result was dropped
    Discarded,
    /// The ranked task was cancelled or panicked
    Aborted,
}

/// Handle to the fire-and-forget ranked stage of a completed cycle.
///
/// Dropping it leaves the ranked request running.
#[derive(Debug)]
pub struct CycleHandle {
    generation: u64,
    ranked: JoinHandle<RankedOutcome>,
}

impl CycleHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_settled(&self) -> bool {
        self.ranked.is_finished()
    }

    /// Wait for the ranked stage to settle.
    pub async fn ranked_settled(self) -> RankedOutcome {
        match self.ranked.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(generation = self.generation, error = %e, "ranked stage did not complete");
                RankedOutcome::Aborted
            }
        }
    }
}

struct Inner<B> {
    backend: B,
    state: watch::Sender<OrchestrationState>,
    generation: AtomicU64,
}

/// Owns the orchestration state and drives search cycles against a backend.
pub struct SearchOrchestrator<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for SearchOrchestrator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: SearchBackend + 'static> SearchOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(OrchestrationState::default());
        Self {
            inner: Arc::new(Inner {
                backend,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<OrchestrationState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> OrchestrationState {
        self.inner.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Entry point for both submit paths.
    ///
    /// While a primary request is in flight the submit is refused with
    /// [`SearchOutcome::Busy`], regardless of which path it came from. The
    /// loading check and the start of the new cycle happen under one state
    /// update, so concurrent submits cannot both pass.
    pub async fn trigger(&self, trigger: Trigger, query: &str) -> SearchOutcome {
        debug!(%trigger, "search submitted");
        self.run_cycle(Some(trigger), query).await
    }

    /// Run one orchestration cycle for `query`.
    ///
    /// Never fails: backend errors are translated into state. Unlike
    /// [`trigger`](Self::trigger) this starts a new cycle even while one is
    /// loading; the older cycle's responses are then discarded.
    pub async fn run_search(&self, query: &str) -> SearchOutcome {
        self.run_cycle(None, query).await
    }

    async fn run_cycle(&self, gate: Option<Trigger>, query: &str) -> SearchOutcome {
        let parsed = Query::parse(query);
        let mut refused = None;
        let mut generation = 0;
        self.inner.state.send_if_modified(|s| {
            if gate.is_some() && s.loading {
                refused = gate;
                return false;
            }
            let Some(query) = parsed.as_ref() else {
                return false;
            };
            generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            s.begin_cycle(generation, query)
        });

        if let Some(trigger) = refused {
            warn!(%trigger, "search already in progress, ignoring submit");
            return SearchOutcome::Busy;
        }
        let Some(query) = parsed else {
            warn!("query is empty, skipping search");
            return SearchOutcome::Skipped;
        };
        debug!(generation, "primary stage started");

        match self.inner.backend.ask_ai(&query).await {
            Ok(response) => {
                let counts = (
                    response.alternative_queries.len(),
                    response.google_results.len(),
                    response.youtube_results.len(),
                );
                if !self
                    .inner
                    .state
                    .send_if_modified(|s| s.apply_primary(generation, response))
                {
                    debug!(generation, "discarding superseded primary response");
                    return SearchOutcome::Superseded { generation };
                }
                debug!(
                    generation,
                    alternatives = counts.0,
                    web = counts.1,
                    videos = counts.2,
                    "primary stage settled"
                );
                SearchOutcome::Completed(CycleHandle {
                    generation,
                    ranked: self.spawn_ranked(generation, query),
                })
            }
            Err(err) => {
                let message = err.user_message();
                error!(
                    generation,
                    code = err.code_str(),
                    error = %err,
                    "primary search request failed"
                );
                if !self
                    .inner
                    .state
                    .send_if_modified(|s| s.apply_primary_failure(generation, message.clone()))
                {
                    return SearchOutcome::Superseded { generation };
                }
                SearchOutcome::Failed {
                    generation,
                    message,
                }
            }
        }
    }

    fn spawn_ranked(&self, generation: u64, query: Query) -> JoinHandle<RankedOutcome> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            match inner.backend.ranked_results(&query).await {
                Ok(items) => {
                    let count = items.len();
                    if inner
                        .state
                        .send_if_modified(|s| s.apply_ranked(generation, items))
                    {
                        debug!(generation, count, "ranked stage settled");
                        RankedOutcome::Applied(count)
                    } else {
                        debug!(generation, "discarding superseded ranked results");
                        RankedOutcome::Discarded
                    }
                }
                Err(err) => {
                    warn!(
                        generation,
                        code = err.code_str(),
                        error = %err,
                        "failed to fetch ranked results"
                    );
                    if inner
                        .state
                        .send_if_modified(|s| s.apply_ranked_failure(generation))
                    {
                        RankedOutcome::Failed
                    } else {
                        debug!(generation, "discarding superseded ranked failure");
                        RankedOutcome::Discarded
                    }
                }
            }
        })
    }
}
