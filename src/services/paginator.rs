use std::cmp::Ordering;

use crate::models::view::PaymentRow;

/// Rows of one page plus the page count of the whole sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated {
    pub rows: Vec<PaymentRow>,
    pub total_pages: usize,
}

/// Order rows most recent payment first
///
/// Rows with equal payment dates keep their position from `rows`.
pub fn sort_by_payment_date_desc(rows: Vec<PaymentRow>) -> Vec<PaymentRow> {
    let mut indexed: Vec<(usize, PaymentRow)> = rows.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| match b.payment_date.cmp(&a.payment_date) {
        Ordering::Equal => ia.cmp(ib),
        other => other,
    });
    indexed.into_iter().map(|(_, row)| row).collect()
}

/// Number of pages needed for `count` rows, zero when there are none
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Sort, then slice the 1-based `page`
///
/// No bounds checking: a page outside `1..=total_pages` yields no rows.
pub fn paginate(rows: Vec<PaymentRow>, page: usize, page_size: usize) -> Paginated {
    let total_pages = total_pages(rows.len(), page_size);
    let sorted = sort_by_payment_date_desc(rows);

    let rows = match page.checked_sub(1) {
        Some(index) if page_size > 0 => sorted
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        _ => Vec::new(),
    };

    Paginated { rows, total_pages }
}
