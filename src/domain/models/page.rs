#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Zero-based page; a size of 0 is bumped to 1.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    page: usize,
    size: usize,
    total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total,
        }
    }

    /// Slices an already loaded, ordered collection.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.size())
            .collect();
        Self::new(items, request, total)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.size as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_all_slices_requested_page() {
        let page = Page::from_all((1..=7).collect::<Vec<_>>(), PageRequest::new(1, 3));

        assert_eq!(page.items(), &[4, 5, 6]);
        assert_eq!(page.total(), 7);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = Page::from_all(vec![1, 2], PageRequest::new(5, 10));

        assert!(page.is_empty());
        assert_eq!(page.total(), 2);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_zero_size_request() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.size(), 1);

        let page = Page::new(vec![1, 2, 3], request, 3);
        assert_eq!(page.size(), 1);
        assert_eq!(page.total_pages(), 3);
    }
}
