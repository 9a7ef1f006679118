// Service modules
pub mod aggregator;
pub mod backend_client;
pub mod paginator;
pub mod payment_view_service;
pub mod row_filter;

pub use backend_client::{BackendClient, PurchasesApi};
pub use payment_view_service::{build_view, PaymentViewService};
