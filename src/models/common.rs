use serde::{Deserialize, Deserializer, Serialize};

/// List payload as returned by the business API
///
/// Some endpoints answer with a bare JSON array, others wrap it as
/// `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Wrapped { data } => data,
            Listing::Bare(items) => items,
        }
    }
}

/// Money amount as sent over the wire (number or decimal string)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Accept `500`, `500.5` and `"500.00"` alike
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => Ok(n),
        RawAmount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {:?}", s))),
    }
}

/// Record a payment can be booked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PaymentTarget {
    Purchase(i64),
    Invoice(i64),
}

impl PaymentTarget {
    /// Path segment of the business API collection owning the payments
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Purchase(_) => "purchases",
            Self::Invoice(_) => "invoices",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Purchase(id) | Self::Invoice(id) => *id,
        }
    }
}
