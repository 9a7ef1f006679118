use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::BackendConfig,
    error::{ApiError, Result},
    models::{
        common::{Listing, PaymentTarget},
        payment::{NewPaymentRequest, PaymentRecord},
        purchase::{Purchase, PurchasePayments},
    },
};

/// Calls into the business API that owns purchases and payments
///
/// Every call forwards the caller's bearer token. A `401` from the API
/// surfaces as [`ApiError::SessionExpired`].
#[async_trait]
pub trait PurchasesApi: Send + Sync {
    async fn list_purchases(&self, token: &str) -> Result<Vec<Purchase>>;

    async fn list_payments(&self, token: &str, purchase_id: i64) -> Result<PurchasePayments>;

    async fn add_payment(
        &self,
        token: &str,
        target: PaymentTarget,
        payment: &NewPaymentRequest,
    ) -> Result<PaymentRecord>;
}

pub struct BackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody<'a> {
    amount: f64,
    method: &'a str,
    payment_date: &'a str,
    reference_number: Option<&'a str>,
    notes: Option<&'a str>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> std::result::Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T> {
        let response = self
            .http_client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("GET {} failed: {}", path, e)))?;

        Self::read_json(path, response).await
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let response = Self::check_status(path, response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Backend(format!("Invalid response from {}: {}", path, e)))
    }

    /// Map non-success statuses onto the error taxonomy
    async fn check_status(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Business API {} answered {}: {}", path, status, body);

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                ApiError::SessionExpired("The business API rejected the session".to_string())
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(format!("{} does not exist", path)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(format!("Rejected by business API: {}", body))
            }
            _ => ApiError::Backend(format!("{} returned status {}", path, status)),
        })
    }
}

#[async_trait]
impl PurchasesApi for BackendClient {
    #[instrument(skip(self, token))]
    async fn list_purchases(&self, token: &str) -> Result<Vec<Purchase>> {
        let listing: Listing<Purchase> = self.get_json(token, "purchases").await?;
        Ok(listing.into_vec())
    }

    #[instrument(skip(self, token))]
    async fn list_payments(&self, token: &str, purchase_id: i64) -> Result<PurchasePayments> {
        self.get_json(token, &format!("purchases/{}/payments", purchase_id))
            .await
    }

    #[instrument(skip(self, token, payment))]
    async fn add_payment(
        &self,
        token: &str,
        target: PaymentTarget,
        payment: &NewPaymentRequest,
    ) -> Result<PaymentRecord> {
        let path = format!("{}/{}/payments", target.collection(), target.id());
        let body = CreatePaymentBody {
            amount: payment.amount,
            method: &payment.method,
            payment_date: &payment.payment_date,
            reference_number: payment.reference_number.as_deref(),
            notes: payment.notes.as_deref(),
        };

        let response = self
            .http_client
            .post(self.url(&path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("POST {} failed: {}", path, e)))?;

        Self::read_json(&path, response).await
    }
}
