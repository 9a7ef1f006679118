use serde::{Deserialize, Serialize};

use super::common::deserialize_amount;
use super::payment::PaymentRecord;

/// Vendor-side order with a grand total due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub purchase_no: String,
    pub vendor_name: String,
    pub date: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub grand_total: f64,
}

/// Payments of one purchase with the totals computed by the business API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasePayments {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_paid: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub outstanding: f64,
}

/// A purchase joined with the outcome of fetching its payments
///
/// `payments` is `None` when that fetch failed.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseWithPayments {
    pub purchase: Purchase,
    pub payments: Option<PurchasePayments>,
}
