use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::upload::{UploadEnvelope, UploadOutcome};

/// HTTP client for the Capra backend.
///
/// Two endpoints, both JSON:
/// - `GET {base}/api/hello` → `{ "message": ... }`
/// - `POST {base}/api/upload` (multipart, one `file` field) → success or
///   error envelope. The backend reports application failures inside
///   the body (`{"error": ...}`), so the response is decoded the same
///   way regardless of HTTP status.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: trim_trailing_slash(base_url.into()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

// ── Backend response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct HelloResponse {
    message: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioBackend for HttpBackend {
    fn name(&self) -> &str {
        "Capra backend"
    }

    async fn hello(&self) -> Result<String, CoreError> {
        let url = format!("{}/api/hello", self.base_url);

        let resp: HelloResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/api/hello".into(),
                message: format!("Failed to parse hello response: {e}"),
            })?;

        Ok(resp.message)
    }

    async fn upload_portfolio(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, CoreError> {
        let url = format!("{}/api/upload", self.base_url);

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| CoreError::InvalidUpload(format!("Invalid file part: {e}")))?;
        let form = Form::new().part("file", part);

        log::info!("Uploading {filename} to {url}");

        let envelope: UploadEnvelope = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/api/upload".into(),
                message: format!("Failed to parse upload response: {e}"),
            })?;

        Ok(envelope.into_outcome())
    }
}
