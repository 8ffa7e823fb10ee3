use serde::Serialize;

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// A single page holding the whole collection.
    pub fn all() -> Self {
        Self { page: 0, limit: usize::MAX }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.limit)
    }
}

/// One page of a collection plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest { page: 1, limit: 10 };
        assert_eq!(request.offset(), 10);
        assert_eq!(Page::new(vec![1, 2, 3, 4, 5], 15, request).total_pages(), 2);
        assert_eq!(Page::<u8>::new(vec![], 0, request).total_pages(), 0);
        assert_eq!(Page::<u8>::new(vec![], 20, request).total_pages(), 2);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let request = PageRequest { page: usize::MAX, limit: 10 };
        assert_eq!(request.offset(), usize::MAX);
    }
}
