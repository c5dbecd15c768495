//! Page windows over ordered question listings.

/// Default number of questions per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Return the `page`-th window of `page_size` items (pages start at 1).
///
/// Pages below 1 are read as page 1. A window starting past the end yields an
/// empty vector; deciding whether that is an error is up to the caller.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Vec<T> {
    let page = page.max(1) as u64;
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size as u64);

    if start >= items.len() as u64 {
        return Vec::new();
    }

    let start = start as usize;
    let end = start.saturating_add(page_size).min(items.len());
    items[start..end].to_vec()
}

/// Read a `page` query value. Absent or non-integer input means page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}
