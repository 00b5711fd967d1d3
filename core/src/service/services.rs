use std::sync::Arc;

use crate::config::AppConfig;

use super::{ArtifactFetcher, HistoryService, RedactionService};

/// Collaborators the front-end needs, built once from config.
#[derive(Clone)]
pub struct Services {
    pub redaction: Arc<dyn RedactionService>,
    pub history: Arc<dyn HistoryService>,
    pub fetcher: Arc<dyn ArtifactFetcher>,
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services>;
}
