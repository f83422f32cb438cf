//! Fixed-size paging for listing queries.

/// Number of rows per page.
pub const PAGE_SIZE: usize = 10;

/// Cuts one page out of a sorted result.
///
/// `None` means no paging: the caller gets the whole result. Page indexes
/// are zero-based, and a page past the end is an empty list, not an error.
pub fn take_page<T>(items: Vec<T>, page_index: Option<usize>) -> Vec<T> {
    match page_index {
        None => items,
        Some(page) => items
            .into_iter()
            .skip(page.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_page_index_returns_everything() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(take_page(items.clone(), None), items);
    }

    #[test]
    fn first_page_holds_first_ten() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(take_page(items, Some(0)), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn last_partial_page_holds_remainder() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(take_page(items, Some(2)), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..25).collect();
        assert!(take_page(items, Some(3)).is_empty());
    }
}
