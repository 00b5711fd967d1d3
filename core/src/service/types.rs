use bytes::Bytes;

use crate::artifact::MediaType;

/// One multipart submission: the file part plus flat text fields.
#[derive(Clone, Debug)]
pub struct RedactionRequest {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Bytes,
    /// Text fields in send order.
    pub fields: Vec<(String, String)>,
}

impl RedactionRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw settled response. Status classification is left to the caller.
#[derive(Clone, Debug)]
pub struct ServiceResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug)]
pub struct FetchedArtifact {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}
