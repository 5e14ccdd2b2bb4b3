//! Hosted-checkout payment gateway client.
//!
//! Handlers only see the [`PaymentGateway`] trait; production wires in
//! [`HttpGateway`], tests substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use campus_core::error::CoreError;
use campus_core::types::MinorUnits;
use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Checkout initialization parameters.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeRequest {
    pub email: String,
    /// Amount in minor units (kobo, cents).
    pub amount: MinorUnits,
    pub currency: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Where to send the learner to pay.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeResponse {
    pub authorization_url: String,
    pub access_code: Option<String>,
    pub reference: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout for `request.reference`.
    async fn initialize(&self, request: &InitializeRequest)
        -> Result<InitializeResponse, CoreError>;
}

/// Envelope the gateway wraps every response in.
#[derive(Debug, Deserialize)]
struct GatewayEnvelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

/// `reqwest`-backed gateway speaking the `/transaction/initialize` API.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    secret: String,
}

impl HttpGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.gateway_url.clone(),
            secret: config.gateway_secret.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> Result<InitializeResponse, CoreError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret)
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("Gateway request failed: {e}")))?;

        let status = response.status();
        let envelope: GatewayEnvelope<InitializeResponse> = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("Gateway returned HTTP {status}: {e}")))?;

        match envelope.data {
            Some(data) if envelope.status && status.is_success() => Ok(data),
            _ => Err(CoreError::Upstream(format!(
                "Gateway rejected initialization (HTTP {status}): {}",
                envelope.message
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_request_omits_missing_callback() {
        let req = InitializeRequest {
            email: "ada@example.com".into(),
            amount: 500_000,
            currency: "NGN".into(),
            reference: "CP-1-2-abc".into(),
            callback_url: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["amount"], 500_000);
        assert!(json.get("callback_url").is_none());
    }

    #[test]
    fn envelope_parses_gateway_shape() {
        let raw = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.example/abc",
                "access_code": "abc",
                "reference": "CP-1-2-abc"
            }
        }"#;
        let env: GatewayEnvelope<InitializeResponse> = serde_json::from_str(raw).unwrap();
        assert!(env.status);
        let data = env.data.unwrap();
        assert_eq!(data.authorization_url, "https://checkout.example/abc");
        assert_eq!(data.reference, "CP-1-2-abc");
    }

    #[test]
    fn new_does_not_panic() {
        let _ = HttpGateway::new(&PaymentConfig {
            gateway_url: "http://localhost:9".into(),
            gateway_secret: "sk_test".into(),
            callback_url: None,
        });
    }
}
