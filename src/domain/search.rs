//! Case-insensitive search and fixed-size client-side pagination.
//!
//! Shared by the filings and news lists. Pages are 1-based; an empty list
//! still has one (empty) page.

pub const PAGE_SIZE: usize = 20;

/// A record with one designated text field that search matches against.
pub trait Searchable {
    fn search_text(&self) -> &str;
}

/// Records whose search text contains `term`, ignoring case, in original order.
pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.search_text().to_lowercase().contains(&needle))
        .collect()
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Items on 1-based page `n`; pages past the end are empty.
pub fn page<T>(items: &[T], n: usize) -> &[T] {
    let start = n.saturating_sub(1).saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

pub fn has_next(page: usize, total: usize) -> bool {
    page.saturating_mul(PAGE_SIZE) < total
}

pub fn has_previous(page: usize) -> bool {
    page > 1
}

/// One rendered page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

pub fn paginate<'a, T: Searchable>(records: &'a [T], term: &str, n: usize) -> PageView<'a, T> {
    let filtered = filter(records, term);
    let total = filtered.len();
    PageView {
        items: page(&filtered, n).to_vec(),
        page: n,
        page_count: page_count(total),
        total,
        has_next: has_next(n, total),
        has_previous: has_previous(n),
    }
}
