//! Shared application state.

use std::sync::{Arc, Mutex};

use questlog_core::clock::Clock;
use questlog_core::record::RecordStore;
use questlog_core::rng::DeterministicRng;
use questlog_narrative::application::session_locks::SessionLocks;
use questlog_narrative::domain::extraction::SignalExtractor;
use questlog_narrative::gateway::NarrationBackends;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock>,
    /// RNG for dice rolls. Locked only in synchronous sections.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Record store for every entity.
    pub store: Arc<dyn RecordStore>,
    /// Narration gateways, one per backend.
    pub narration: Arc<NarrationBackends>,
    /// Reads game-state signals from narration.
    pub extractor: Arc<dyn SignalExtractor>,
    /// Keeps turns on the same session from overlapping.
    pub session_locks: Arc<SessionLocks>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        store: Arc<dyn RecordStore>,
        narration: Arc<NarrationBackends>,
        extractor: Arc<dyn SignalExtractor>,
    ) -> Self {
        Self {
            clock,
            rng,
            store,
            narration,
            extractor,
            session_locks: Arc::new(SessionLocks::new()),
        }
    }
}
