//! Orchestration state and its transitions.
//!
//! All mutation goes through the transition functions below. Each one
//! returns `true` when it changed the state, which lets the orchestrator
//! publish through `watch::Sender::send_if_modified` and skip waking
//! renderers for discarded events.
//!
//! Completion transitions carry the generation of the cycle that issued the
//! request. Events from an older generation are ignored, so a slow response
//! from a superseded query can never overwrite the current one.

use crate::types::{AskAiResponse, Query, RankedResultItem, SearchResultItem, VideoResultItem};
use serde::{Deserialize, Serialize};

/// Coarse view of the state for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No search has run yet
    Idle,
    /// Primary request in flight
    Loading,
    /// Primary request failed; `error` is set
    Failed,
    /// Primary request succeeded; ranked results may still be pending
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationState {
    /// Query of the current cycle
    pub query: Option<String>,

    /// Generation of the current cycle (0 before the first search)
    pub generation: u64,

    pub alternative_queries: Vec<String>,
    pub search_results: Vec<SearchResultItem>,
    pub video_results: Vec<VideoResultItem>,
    pub ranked_results: Vec<RankedResultItem>,

    /// True exactly while the primary request is outstanding
    pub loading: bool,

    /// User-visible message from a failed primary request
    pub error: Option<String>,

    /// True while the ranked request is outstanding
    pub ranked_pending: bool,
}

impl OrchestrationState {
    /// Enter the loading state for a new cycle, discarding all prior results.
    pub fn begin_cycle(&mut self, generation: u64, query: &Query) -> bool {
        self.query = Some(query.as_str().to_string());
        self.generation = generation;
        self.alternative_queries.clear();
        self.search_results.clear();
        self.video_results.clear();
        self.ranked_results.clear();
        self.loading = true;
        self.error = None;
        self.ranked_pending = false;
        true
    }

    pub fn apply_primary(&mut self, generation: u64, response: AskAiResponse) -> bool {
        if generation != self.generation {
            return false;
        }
        self.alternative_queries = response.alternative_queries;
        self.search_results = response.google_results;
        self.video_results = response.youtube_results;
        self.loading = false;
        self.ranked_pending = true;
        true
    }

    pub fn apply_primary_failure(&mut self, generation: u64, message: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.error = Some(message);
        self.loading = false;
        self.ranked_pending = false;
        true
    }

    pub fn apply_ranked(&mut self, generation: u64, items: Vec<RankedResultItem>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.ranked_results = items;
        self.ranked_pending = false;
        true
    }

    /// Ranked failures are silent: only the pending flag changes.
    pub fn apply_ranked_failure(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.ranked_pending {
            return false;
        }
        self.ranked_pending = false;
        true
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.generation == 0 {
            Phase::Idle
        } else {
            Phase::Ready
        }
    }

    /// Nothing in flight for the current cycle.
    pub fn is_idle(&self) -> bool {
        !self.loading && !self.ranked_pending
    }

    pub fn has_results(&self) -> bool {
        !self.alternative_queries.is_empty()
            || !self.search_results.is_empty()
            || !self.video_results.is_empty()
            || !self.ranked_results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> Query {
        Query::parse(text).unwrap()
    }

    fn ranked(title: &str, score: f64) -> RankedResultItem {
        RankedResultItem {
            source: "Google".into(),
            title: title.into(),
            link: format!("https://example.com/{}", title),
            rank_score: score,
            snippet: None,
        }
    }

    fn populated() -> OrchestrationState {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &query("old"));
        state.apply_primary(
            1,
            AskAiResponse {
                alternative_queries: vec!["old one".into()],
                google_results: vec![SearchResultItem {
                    title: "Old".into(),
                    link: "https://old".into(),
                    snippet: String::new(),
                }],
                ..Default::default()
            },
        );
        state.apply_ranked(1, vec![ranked("old", 1.0)]);
        state
    }

    #[test]
    fn test_default_is_idle() {
        let state = OrchestrationState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.is_idle());
        assert!(!state.has_results());
    }

    #[test]
    fn test_begin_cycle_clears_everything() {
        let mut state = populated();
        state.error = Some("stale".into());
        assert!(state.has_results());

        state.begin_cycle(2, &query("new"));
        assert!(!state.has_results());
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.query.as_deref(), Some("new"));
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn test_primary_success_ends_loading() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &query("rust"));
        assert!(state.apply_primary(
            1,
            AskAiResponse {
                alternative_queries: vec!["a".into(), "b".into()],
                ..Default::default()
            }
        ));
        assert!(!state.loading);
        assert!(state.ranked_pending);
        assert_eq!(state.alternative_queries.len(), 2);
        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.is_idle());
    }

    #[test]
    fn test_primary_failure_sets_error() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &query("rust"));
        assert!(state.apply_primary_failure(1, "rate limited".into()));
        assert_eq!(state.error.as_deref(), Some("rate limited"));
        assert!(!state.loading);
        assert!(!state.ranked_pending);
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.is_idle());
    }

    #[test]
    fn test_ranked_failure_keeps_primary_results() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &query("rust"));
        state.apply_primary(
            1,
            AskAiResponse {
                alternative_queries: vec!["a".into()],
                ..Default::default()
            },
        );
        assert!(state.apply_ranked_failure(1));
        assert_eq!(state.alternative_queries, vec!["a".to_string()]);
        assert!(state.error.is_none());
        assert!(state.ranked_results.is_empty());
        assert!(state.is_idle());

        // Nothing pending anymore, so a duplicate failure is a no-op
        assert!(!state.apply_ranked_failure(1));
    }

    #[test]
    fn test_stale_generations_are_ignored() {
        let mut state = populated();
        state.begin_cycle(2, &query("new"));
        let snapshot = state.clone();

        assert!(!state.apply_primary(1, AskAiResponse::default()));
        assert!(!state.apply_primary_failure(1, "late".into()));
        assert!(!state.apply_ranked(1, vec![ranked("late", 9.0)]));
        assert!(!state.apply_ranked_failure(1));
        assert_eq!(state, snapshot);
    }
}
