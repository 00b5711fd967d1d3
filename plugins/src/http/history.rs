use async_trait::async_trait;
use deid_core::api::{Endpoints, HistoryEntry, HistoryError, HistoryService};
use reqwest::Client;

pub struct HttpHistoryService {
    client: Client,
    endpoints: Endpoints,
}

impl HttpHistoryService {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl HistoryService for HttpHistoryService {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let url = self.endpoints.history();
        tracing::debug!(target: "deid.http", url = %url, "GET history");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HistoryError::Transport(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HistoryError::Transport(e.into()))?;
        serde_json::from_slice::<Vec<HistoryEntry>>(&body).map_err(|e| HistoryError::Decode(e.into()))
    }
}
