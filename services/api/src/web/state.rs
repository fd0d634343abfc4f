//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use mindmate_core::ports::ActivityStore;
use mindmate_core::{EngagementAnalyzer, ResponseEngine};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ActivityStore>,
    pub config: Arc<Config>,
    pub responder: Arc<ResponseEngine>,
    pub analyzer: EngagementAnalyzer,
}

impl AppState {
    /// Wires the built-in response rules and an analyzer for the configured day offset.
    pub fn new(store: Arc<dyn ActivityStore>, config: Arc<Config>) -> Self {
        Self {
            store,
            analyzer: EngagementAnalyzer::new(config.day_offset),
            responder: Arc::new(ResponseEngine::default()),
            config,
        }
    }
}
