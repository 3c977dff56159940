use axum::extract::FromRef;

use crate::corpus::Corpus;
use crate::dashboard::DashboardSettings;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

/// The corpus is read-only once aggregated, so handlers share it without a lock.
pub type SharedCorpus = Arc<Corpus>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub corpus: SharedCorpus,
}

impl ServerState {
    pub fn new(config: ServerConfig, corpus: SharedCorpus) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            corpus,
        }
    }
}

impl FromRef<ServerState> for SharedCorpus {
    fn from_ref(input: &ServerState) -> Self {
        input.corpus.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for DashboardSettings {
    fn from_ref(input: &ServerState) -> Self {
        input.config.dashboard.clone()
    }
}
