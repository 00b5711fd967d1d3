//! Builds every HTTP collaborator from config so the CLI wires them in one place.
use deid_core::api::{AppConfig, Endpoints, Services, ServicesFactory};

use crate::factory;
use crate::http::build_client;

#[derive(Default)]
pub struct PluginServicesFactory;

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services> {
        let client = build_client(&cfg.service)?;
        let endpoints = Endpoints::new(&cfg.service.base_url);
        let redaction = factory::build_redaction(client.clone(), endpoints.clone());
        let history = factory::build_history(client.clone(), endpoints.clone());
        let fetcher = factory::build_fetcher(client, endpoints);
        tracing::debug!(
            target: "deid.http",
            base_url = %cfg.service.base_url,
            mode = %cfg.service.mode,
            timeout_ms = ?cfg.service.timeout_ms,
            "services built"
        );
        Ok(Services {
            redaction,
            history,
            fetcher,
        })
    }
}
