use crate::core::normalize::normalize;
use crate::core::xml::parse_xml;
use crate::domain::model::{ContentKind, Part, RawRecord};
use crate::utils::error::{CatalogError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the catalog feeds. All requests carry a bounded timeout;
/// the upstream feeds have none of their own and a hung request must not
/// stall a render indefinitely.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches one catalog document and returns its raw records in source
    /// order. The response's declared content kind picks the parse path:
    /// JSON-family bodies (including JSON served as `text/plain`) decode as
    /// a top-level array, XML-family bodies go through the `<part>`
    /// extractor, anything else is an unsupported content type.
    pub async fn fetch_catalog(&self, endpoint: &str) -> Result<Vec<RawRecord>> {
        tracing::debug!("Fetching catalog from: {}", endpoint);
        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let kind = ContentKind::classify(&content_type).ok_or_else(|| {
            CatalogError::UnsupportedContentType {
                content_type: if content_type.is_empty() {
                    "(none)".to_string()
                } else {
                    content_type.clone()
                },
            }
        })?;

        let body = response.text().await?;
        match kind {
            ContentKind::Json => json_records(&body),
            ContentKind::Xml => parse_xml(&body),
        }
    }

    /// Submits one new record to a catalog endpoint as a JSON body.
    /// Write-back capability only; nothing in the render pipeline reads it.
    pub async fn submit_part(&self, endpoint: &str, part: &Part) -> Result<()> {
        tracing::debug!("Submitting part '{}' to: {}", part.name, endpoint);
        let response = self.client.post(endpoint).json(part).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }
        Ok(())
    }

    /// Validates a raw record and submits it. Unlike the fetch path, a
    /// defect here propagates as a `Record` error instead of being skipped;
    /// a write-back has no surrounding document to recover into.
    pub async fn submit_record(&self, endpoint: &str, raw: &RawRecord) -> Result<Part> {
        let part = normalize(raw)?;
        self.submit_part(endpoint, &part).await?;
        Ok(part)
    }

    /// Read-modify-write variant of [`submit_part`](Self::submit_part):
    /// GET the current JSON array, append the record, PUT the whole
    /// document back.
    pub async fn append_part(&self, endpoint: &str, part: &Part) -> Result<()> {
        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }

        let mut document: Value = response.json().await?;
        match document.as_array_mut() {
            Some(items) => items.push(serde_json::to_value(part)?),
            None => {
                return Err(CatalogError::Parse {
                    message: "expected a top-level JSON array of parts".to_string(),
                })
            }
        }

        let response = self.client.put(endpoint).json(&document).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }
        Ok(())
    }
}

fn json_records(body: &str) -> Result<Vec<RawRecord>> {
    let document: Value = serde_json::from_str(body)?;

    let Value::Array(items) = document else {
        return Err(CatalogError::Parse {
            message: "expected a top-level JSON array of parts".to_string(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(data) => records.push(RawRecord { data }),
            other => {
                // Same policy as a defective record: skip, keep the rest.
                tracing::warn!("Skipping non-object entry #{}: {}", index, other);
            }
        }
    }
    Ok(records)
}
