use crate::models::view::{PaymentRow, ViewFilters};

/// Keep the rows matching every set criterion, preserving their order
pub fn filter_rows(rows: &[PaymentRow], filters: &ViewFilters) -> Vec<PaymentRow> {
    let search = filters.search().map(str::to_lowercase);
    let vendor = filters.vendor();
    let date = filters.date();

    rows.iter()
        .filter(|row| search.as_deref().map_or(true, |term| matches_search(row, term)))
        .filter(|row| vendor.map_or(true, |v| row.vendor_name == v))
        .filter(|row| date.map_or(true, |d| row.payment_date.starts_with(d)))
        .cloned()
        .collect()
}

// `term` is already lowercased
fn matches_search(row: &PaymentRow, term: &str) -> bool {
    row.purchase_no.to_lowercase().contains(term)
        || row.vendor_name.to_lowercase().contains(term)
        || row
            .reference_number
            .as_deref()
            .is_some_and(|reference| reference.to_lowercase().contains(term))
}
