use serde::{Deserialize, Serialize};

/// Method shown for purchases that have no payment recorded yet
pub const UNPAID_METHOD: &str = "Not Paid";

/// Notes attached to synthesized unpaid rows
pub const UNPAID_NOTES: &str = "No payments recorded yet";

/// One line of the purchase payments table
///
/// Real payments carry their positive record id; unpaid placeholders carry
/// the negated purchase id, so the two never collide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub id: i64,
    pub purchase_id: i64,
    pub purchase_no: String,
    pub vendor_name: String,
    pub payment_date: String,
    pub amount: f64,
    pub method: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    // Totals of the owning purchase, identical on all of its rows
    pub total_paid: f64,
    pub outstanding: f64,
}

impl PaymentRow {
    pub fn is_unpaid_placeholder(&self) -> bool {
        self.id < 0
    }
}

/// Table filters; an unset or empty criterion matches every row
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewFilters {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ViewFilters {
    pub fn new(search: &str, vendor: &str, date: &str) -> Self {
        Self {
            search: Some(search.to_string()),
            vendor: Some(vendor.to_string()),
            date: Some(date.to_string()),
        }
    }

    pub fn search(&self) -> Option<&str> {
        non_empty(&self.search)
    }

    pub fn vendor(&self) -> Option<&str> {
        non_empty(&self.vendor)
    }

    pub fn date(&self) -> Option<&str> {
        non_empty(&self.date)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Query string of `GET /api/v1/purchase-payments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentViewQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

impl PaymentViewQuery {
    pub fn filters(&self) -> ViewFilters {
        ViewFilters {
            search: self.search.clone(),
            vendor: self.vendor.clone(),
            date: self.date.clone(),
        }
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

/// One page of the sorted, filtered payment rows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPage {
    pub rows: Vec<PaymentRow>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}
