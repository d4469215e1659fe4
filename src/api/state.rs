use std::sync::Arc;

use crate::{config::Config, error::AppResult, services::Recommender};

/// Shared application state
///
/// Built once at startup and never mutated; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }

    /// Creates the state with providers wired from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(Recommender::from_config(config)?))
    }
}
