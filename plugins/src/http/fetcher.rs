use async_trait::async_trait;
use deid_core::api::{ArtifactFetcher, ArtifactRef, Endpoints, FetchedArtifact, TransportError};
use reqwest::Client;

use super::{content_type, transport_error};

/// Downloads previews and redacted artifacts by job id.
pub struct HttpArtifactFetcher {
    client: Client,
    endpoints: Endpoints,
}

impl HttpArtifactFetcher {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, target: &ArtifactRef) -> Result<FetchedArtifact, TransportError> {
        let url = self.endpoints.resolve(target);
        tracing::debug!(target: "deid.http", url = %url, "GET artifact");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        let content_type = content_type(&response);
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(FetchedArtifact {
            content_type,
            bytes,
        })
    }
}
