use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{info, instrument, warn};

use crate::{
    config::{BackendConfig, ViewConfig},
    error::{ApiError, Result},
    models::{
        common::PaymentTarget,
        payment::{NewPaymentRequest, PaymentRecord},
        purchase::{Purchase, PurchaseWithPayments},
        view::{PaymentPage, ViewFilters},
    },
    services::{
        aggregator::aggregate_rows,
        backend_client::PurchasesApi,
        paginator::{paginate, total_pages},
        row_filter::filter_rows,
    },
};

/// Build one page of the purchase payments table
///
/// Pure: aggregate, filter, then sort and slice. The requested page is
/// clamped into `1..=total_pages` before slicing.
pub fn build_view(
    entries: &[PurchaseWithPayments],
    filters: &ViewFilters,
    page: usize,
    page_size: usize,
) -> PaymentPage {
    let rows = aggregate_rows(entries);
    let filtered = filter_rows(&rows, filters);
    let total_rows = filtered.len();

    let page = page.clamp(1, total_pages(total_rows, page_size).max(1));
    let paged = paginate(filtered, page, page_size);

    PaymentPage {
        rows: paged.rows,
        page,
        page_size,
        total_pages: paged.total_pages,
        total_rows,
    }
}

pub struct PaymentViewService {
    api: Arc<dyn PurchasesApi>,
    page_size: usize,
    max_concurrent_fetches: usize,
}

impl PaymentViewService {
    pub fn new(api: Arc<dyn PurchasesApi>, backend: &BackendConfig, view: &ViewConfig) -> Self {
        Self {
            api,
            page_size: view.page_size,
            max_concurrent_fetches: backend.max_concurrent_fetches.max(1),
        }
    }

    /// Fetch purchases and their payments, then build the requested page
    #[instrument(skip(self, token))]
    pub async fn load(&self, token: &str, filters: &ViewFilters, page: usize) -> Result<PaymentPage> {
        let entries = self.fetch_entries(token).await?;
        let view = build_view(&entries, filters, page, self.page_size);

        info!(
            "Built payment view: purchases={}, rows={}, page={}/{}",
            entries.len(),
            view.total_rows,
            view.page,
            view.total_pages
        );

        Ok(view)
    }

    /// Record a payment against a purchase or an invoice
    #[instrument(skip(self, token, payment))]
    pub async fn add_payment(
        &self,
        token: &str,
        target: PaymentTarget,
        payment: &NewPaymentRequest,
    ) -> Result<PaymentRecord> {
        let record = self.api.add_payment(token, target, payment).await?;
        info!(
            "Recorded payment {} against {} {}: amount={}",
            record.id,
            target.collection(),
            target.id(),
            payment.amount
        );
        Ok(record)
    }

    /// Purchases joined with their payments, in purchase-list order
    async fn fetch_entries(&self, token: &str) -> Result<Vec<PurchaseWithPayments>> {
        let purchases = self.api.list_purchases(token).await.map_err(|e| match e {
            ApiError::SessionExpired(_) => e,
            other => ApiError::Backend(format!("Failed to load purchases: {}", other)),
        })?;

        // `buffered` yields in input order whatever order the fetches finish in;
        // an expired session stops the load and drops the fetches still in flight
        stream::iter(purchases)
            .map(|purchase| self.fetch_payments(token, purchase))
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await
    }

    async fn fetch_payments(&self, token: &str, purchase: Purchase) -> Result<PurchaseWithPayments> {
        match self.api.list_payments(token, purchase.id).await {
            Ok(payments) => Ok(PurchaseWithPayments {
                purchase,
                payments: Some(payments),
            }),
            Err(e @ ApiError::SessionExpired(_)) => Err(e),
            Err(e) => {
                warn!(
                    purchase_id = purchase.id,
                    "Skipping purchase {}: failed to fetch payments: {}", purchase.purchase_no, e
                );
                Ok(PurchaseWithPayments {
                    purchase,
                    payments: None,
                })
            }
        }
    }
}
