use crate::models::{
    purchase::{Purchase, PurchaseWithPayments},
    view::{PaymentRow, UNPAID_METHOD, UNPAID_NOTES},
};

/// Flatten purchases and their payments into table rows
///
/// Emits one row per payment record, in purchase order then record order.
/// A purchase with no records but money owed yields a single unpaid
/// placeholder; one whose payments could not be fetched yields nothing.
pub fn aggregate_rows(entries: &[PurchaseWithPayments]) -> Vec<PaymentRow> {
    let mut rows = Vec::new();

    for entry in entries {
        let purchase = &entry.purchase;
        let Some(summary) = &entry.payments else {
            continue;
        };

        if summary.payments.is_empty() {
            if purchase.grand_total > 0.0 {
                rows.push(unpaid_row(purchase));
            }
            continue;
        }

        rows.extend(summary.payments.iter().map(|payment| PaymentRow {
            id: payment.id,
            purchase_id: purchase.id,
            purchase_no: purchase.purchase_no.clone(),
            vendor_name: purchase.vendor_name.clone(),
            payment_date: payment.payment_date.clone(),
            amount: payment.amount,
            method: payment.method.clone(),
            reference_number: payment.reference_number.clone(),
            notes: payment.notes.clone(),
            total_paid: summary.total_paid,
            outstanding: summary.outstanding,
        }));
    }

    rows
}

fn unpaid_row(purchase: &Purchase) -> PaymentRow {
    PaymentRow {
        id: -purchase.id,
        purchase_id: purchase.id,
        purchase_no: purchase.purchase_no.clone(),
        vendor_name: purchase.vendor_name.clone(),
        // Dated by the purchase so it sorts alongside real payments
        payment_date: purchase.date.clone(),
        amount: 0.0,
        method: UNPAID_METHOD.to_string(),
        reference_number: None,
        notes: Some(UNPAID_NOTES.to_string()),
        total_paid: 0.0,
        outstanding: purchase.grand_total,
    }
}
