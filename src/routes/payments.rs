use axum::{extract::State, Json};
use tracing::{instrument, warn};
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, AppJson, AppPath, AppQuery, Result},
    middleware::BearerToken,
    models::{
        common::PaymentTarget,
        payment::{NewPaymentRequest, NewPaymentResponse},
        view::{PaymentPage, PaymentViewQuery, ViewFilters},
    },
};

/// GET /api/v1/purchase-payments
#[instrument(skip(state, token))]
pub async fn list_purchase_payments(
    State(state): State<AppState>,
    token: BearerToken,
    AppQuery(query): AppQuery<PaymentViewQuery>,
) -> Result<Json<PaymentPage>> {
    let view = state
        .payment_view_service
        .load(token.as_str(), &query.filters(), query.page())
        .await?;

    Ok(Json(view))
}

/// POST /api/v1/purchases/{id}/payments
#[instrument(skip(state, token, request))]
pub async fn add_purchase_payment(
    State(state): State<AppState>,
    token: BearerToken,
    AppPath(purchase_id): AppPath<i64>,
    AppJson(request): AppJson<NewPaymentRequest>,
) -> Result<Json<NewPaymentResponse>> {
    record_payment(&state, &token, PaymentTarget::Purchase(purchase_id), request).await
}

/// POST /api/v1/invoices/{id}/payments
#[instrument(skip(state, token, request))]
pub async fn add_invoice_payment(
    State(state): State<AppState>,
    token: BearerToken,
    AppPath(invoice_id): AppPath<i64>,
    AppJson(request): AppJson<NewPaymentRequest>,
) -> Result<Json<NewPaymentResponse>> {
    record_payment(&state, &token, PaymentTarget::Invoice(invoice_id), request).await
}

/// Forward the payment, then reload the first page of the unfiltered view
///
/// Once the payment is recorded the request succeeds even if the reload
/// fails (`view` is then null), so the dashboard never retries a booked
/// payment. An expired session still takes the forced-logout path.
async fn record_payment(
    state: &AppState,
    token: &BearerToken,
    target: PaymentTarget,
    request: NewPaymentRequest,
) -> Result<Json<NewPaymentResponse>> {
    if target.id() <= 0 {
        return Err(ApiError::BadRequest(format!(
            "Invalid {} id: {}",
            target.collection(),
            target.id()
        )));
    }

    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let payment = state
        .payment_view_service
        .add_payment(token.as_str(), target, &request)
        .await?;

    let view = match state
        .payment_view_service
        .load(token.as_str(), &ViewFilters::default(), 1)
        .await
    {
        Ok(view) => Some(view),
        Err(e @ ApiError::SessionExpired(_)) => return Err(e),
        Err(e) => {
            warn!(
                payment_id = payment.id,
                "Payment recorded but reloading the view failed: {}", e
            );
            None
        }
    };

    Ok(Json(NewPaymentResponse { payment, view }))
}
