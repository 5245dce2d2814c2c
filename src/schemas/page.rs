use serde::Serialize;

/// 1-based page request, already clamped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: i64,
    pub(crate) limit: i64,
}

impl PageRequest {
    pub(crate) fn new(page: i64, limit: i64) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }

    pub(crate) fn first(limit: i64) -> Self {
        Self::new(1, limit)
    }

    pub(crate) fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Paginated<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total_count: i64,
    pub(crate) page: i64,
    pub(crate) limit: i64,
    pub(crate) has_more: bool,
}

impl<T> Paginated<T> {
    pub(crate) fn new(items: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        let has_more = request.offset() + (items.len() as i64) < total_count;
        Self { items, total_count, page: request.page, limit: request.limit, has_more }
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
        }
    }
}
