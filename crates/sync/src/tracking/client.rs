//! HTTP client for the user-configured tracking webhook.

use gated_core::Carrier;
use serde::Serialize;

use super::payload::TrackerPayload;
use super::{FetchTracker, TrackingError};

/// Request body the webhook receives.
#[derive(Debug, Serialize)]
struct TrackRequestBody<'a> {
    carrier: Carrier,
    #[serde(rename = "trackingNumber")]
    tracking_number: &'a str,
}

/// Client for the carrier-tracking webhook.
///
/// One POST per user action; no retries and no timeout beyond the transport
/// default. Resilience lives in the caller's degraded path, not here.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookClient {
    /// Create a client for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FetchTracker for WebhookClient {
    async fn fetch(
        &self,
        carrier: Carrier,
        tracking_number: &str,
    ) -> Result<TrackerPayload, TrackingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TrackRequestBody {
                carrier,
                tracking_number,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TrackingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        // Any deviation from the expected shape is a failure, not partial
        // success.
        Ok(serde_json::from_str(&body)?)
    }
}
