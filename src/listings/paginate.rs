/// One numbered page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'s, T> {
    pub items: &'s [T],
    /// 1-based page actually returned
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slice out 1-based `page`. Pages past the end clamp to the last page;
/// page 0 reads as page 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items: items.len(),
    }
}

/// The visible prefix of a load-more gallery
#[derive(Debug, Clone, PartialEq)]
pub struct Window<'s, T> {
    pub items: &'s [T],
    pub total_items: usize,
}

impl<T> Window<'_, T> {
    pub fn has_more(&self) -> bool {
        self.items.len() < self.total_items
    }
}

pub fn visible_window<T>(items: &[T], visible: usize) -> Window<'_, T> {
    Window {
        items: &items[..visible.min(items.len())],
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_fixed_size_pages() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, 1, 10);
        assert_eq!(first.items, &items[..10]);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, &[21, 22, 23]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, 9, 10).page, 2);
        assert_eq!(paginate(&items, 0, 10).page, 1);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn window_grows_until_exhausted() {
        let items: Vec<u32> = (1..=8).collect();
        let window = visible_window(&items, 6);
        assert_eq!(window.items.len(), 6);
        assert!(window.has_more());

        let window = visible_window(&items, 12);
        assert_eq!(window.items.len(), 8);
        assert!(!window.has_more());
    }
}
