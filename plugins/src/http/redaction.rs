use async_trait::async_trait;
use deid_core::api::{Endpoints, RedactionRequest, RedactionService, ServiceResponse, TransportError};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::{content_type, transport_error};

pub struct HttpRedactionService {
    client: Client,
    endpoints: Endpoints,
}

impl HttpRedactionService {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    fn form(req: RedactionRequest) -> Result<Form, TransportError> {
        let file = Part::bytes(req.bytes.to_vec())
            .file_name(req.file_name)
            .mime_str(req.media_type.mime())
            .map_err(transport_error)?;
        let mut form = Form::new().part("file", file);
        for (name, value) in req.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

#[async_trait]
impl RedactionService for HttpRedactionService {
    async fn redact(&self, req: RedactionRequest) -> Result<ServiceResponse, TransportError> {
        let url = self.endpoints.redact();
        tracing::debug!(
            target: "deid.http",
            url = %url,
            file = %req.file_name,
            size = req.bytes.len(),
            "POST redact"
        );
        let form = Self::form(req)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = content_type(&response);
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(target: "deid.http", status, len = body.len(), "redact settled");

        Ok(ServiceResponse {
            status,
            content_type,
            body,
        })
    }
}
