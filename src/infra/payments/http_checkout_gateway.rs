use crate::domain::models::checkout::{CheckoutSession, CheckoutSessionRequest};
use crate::domain::ports::CheckoutGateway;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::error;

pub struct HttpCheckoutGateway {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpCheckoutGateway {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl CheckoutGateway for HttpCheckoutGateway {
    async fn initiate_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, AppError> {
        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Checkout service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::CONFLICT => AppError::Conflict("Selected slot is no longer available".into()),
                StatusCode::UNAUTHORIZED => AppError::Unauthorized,
                StatusCode::NOT_FOUND => AppError::NotFound("Checkout resource not found".into()),
                _ => {
                    let msg = format!("Checkout service failed. Status: {}, Body: {}", status, text);
                    error!("{}", msg);
                    AppError::InternalWithMsg(msg)
                }
            });
        }

        // Malformed payloads fail here instead of propagating missing fields.
        res.json::<CheckoutSession>().await.map_err(|e| {
            let msg = format!("Checkout service returned malformed response: {}", e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })
    }
}
