use reqwest::Client;
use tracing::debug;

use crate::error::RunError;
use crate::workflow::{RunRequest, RunResponse};

/// HTTP client for the backend's run endpoint.
///
/// No client-side timeout: a run lasts as long as the backend needs.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunResponse, RunError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "run response received");

        // The backend reports its own failures as `{success: false}` with a
        // 500, so a parseable body wins over the status code.
        match serde_json::from_slice::<RunResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(RunError::Status(status.as_u16())),
            Err(e) => Err(RunError::Decode(e.to_string())),
        }
    }
}
