use serde::{Deserialize, Serialize};
use time::macros::format_description;
use validator::{Validate, ValidationError};

use super::common::deserialize_amount;
use super::view::PaymentPage;

/// One recorded payment against a purchase or invoice
///
/// Read from the business API in snake_case, sent to the dashboard in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PaymentRecord {
    pub id: i64,
    // Not echoed by the per-purchase listing, only by create responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_id: Option<i64>,
    pub payment_date: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub method: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to record a payment against a purchase or an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    #[validate(length(min = 1, max = 50))]
    pub method: String,

    #[validate(custom(function = "validate_payment_date"))]
    pub payment_date: String,

    #[validate(length(max = 100))]
    pub reference_number: Option<String>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Response after recording a payment: the created record and the reloaded view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentResponse {
    pub payment: PaymentRecord,
    // None when the reload after recording failed
    pub view: Option<PaymentPage>,
}

fn validate_payment_date(value: &str) -> Result<(), ValidationError> {
    time::Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|_| ())
        .map_err(|_| ValidationError::new("payment_date_format"))
}
