//! HTTP InvoicingGateway
//!
//! Thin blocking client over the invoicing system's per-client invoices
//! endpoint. All transport and remote failures surface as `Upstream`, so
//! the cache layer's error handling stays transport-agnostic.

use std::time::Duration;

use chrono::NaiveDate;
use rutero_core::errors::{CoreError, Result};
use rutero_core::gateway::{GatewayInvoice, InvoicingGateway};

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Blocking HTTP client for the invoicing system
pub struct HttpInvoicingGateway {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpInvoicingGateway {
    /// Build a gateway against `base_url` (e.g. `https://billing.example/api`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CoreError::upstream(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Invoices endpoint for one client, tolerant of a trailing slash on base
fn endpoint(base_url: &str, client_id: &str) -> String {
    format!(
        "{}/clients/{}/invoices",
        base_url.trim_end_matches('/'),
        client_id
    )
}

impl InvoicingGateway for HttpInvoicingGateway {
    fn invoices_for(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GatewayInvoice>> {
        let url = endpoint(&self.base_url, client_id);
        tracing::debug!(client_id, %from, %to, "pulling invoices");

        let response = self
            .client
            .get(&url)
            .query(&[("from", from.to_string()), ("to", to.to_string())])
            .send()
            .map_err(|e| CoreError::upstream(format!("invoicing request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::upstream(format!(
                "invoicing system returned {status} for client {client_id}"
            )));
        }

        response
            .json()
            .map_err(|e| CoreError::upstream(format!("invalid invoicing response: {e}")))
    }
}
