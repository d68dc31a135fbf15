/// Number of questions per page in every paginated listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th (one-based) slice of `items`. Pages outside the available range, including
/// non-positive ones, yield an empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    let Some(index) = page.checked_sub(1).and_then(|index| usize::try_from(index).ok()) else {
        return &[];
    };
    let start = index.saturating_mul(QUESTIONS_PER_PAGE).min(items.len());
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
