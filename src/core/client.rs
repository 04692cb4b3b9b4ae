use crate::core::extract::{body_snippet, extract_pdf_bytes};
use crate::domain::model::Credentials;
use crate::domain::ports::{ConfigProvider, InvoiceApi};
use crate::utils::error::{FetchError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Query parameters sent with every lookup, in wire order.
pub fn request_url(base_url: &str, tax_id: &str, serial: &str, identifier: &str) -> Result<Url> {
    Url::parse_with_params(
        base_url,
        &[
            ("stax", tax_id),
            ("serial", serial),
            ("sec", identifier),
            ("type", "pdf"),
        ],
    )
    .map_err(|e| FetchError::config(format!("Invalid base URL '{}': {}", base_url, e)))
}

pub struct HttpInvoiceClient {
    client: Client,
    base_url: String,
    tax_id: String,
    serial: String,
    credentials: Credentials,
}

impl HttpInvoiceClient {
    pub fn new(
        base_url: impl Into<String>,
        tax_id: impl Into<String>,
        serial: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            tax_id: tax_id.into(),
            serial: serial.into(),
            credentials,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.tax_id(),
            config.serial(),
            config.credentials(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn request_url(&self, identifier: &str) -> Result<Url> {
        request_url(&self.base_url, &self.tax_id, &self.serial, identifier)
    }
}

#[async_trait::async_trait]
impl InvoiceApi for HttpInvoiceClient {
    async fn fetch_one(&self, identifier: &str) -> Result<Vec<u8>> {
        let url = self.request_url(identifier)?;
        tracing::debug!("Requesting invoice {} from {}", identifier, self.base_url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status for {}: {}", identifier, status);

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        // anything but 200 is a failure for this identifier
        if status != StatusCode::OK {
            let text = String::from_utf8_lossy(&body);
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                snippet: text.chars().take(500).collect(),
            });
        }

        // zero bytes counts as no payload
        match extract_pdf_bytes(content_type.as_deref(), &body)? {
            Some(pdf) if !pdf.is_empty() => {
                tracing::debug!("Extracted {} PDF bytes for {}", pdf.len(), identifier);
                Ok(pdf)
            }
            _ => Err(FetchError::ExtractionError {
                snippet: body_snippet(&body),
            }),
        }
    }
}
