use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
/// Largest page whose offset still fits in an `i64` at any allowed limit.
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Normalized page window. The offset is always derived, never supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Missing or non-positive values fall back to page 1 / limit 10;
    /// values above `MAX_PAGE` / `MAX_LIMIT` are clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p.min(MAX_PAGE),
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 10)]
    pub limit: i64,
    #[schema(example = 0)]
    pub offset: i64,
    #[schema(example = 42)]
    pub total: i64,
    #[schema(example = 5)]
    pub total_pages: i64,
    pub previous_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = (total + request.limit() - 1) / request.limit();
        let page = request.page();

        Self {
            page,
            limit: request.limit(),
            offset: request.offset(),
            total,
            total_pages,
            previous_page: (page > 1).then(|| page - 1),
            next_page: (page < total_pages).then(|| page + 1),
        }
    }
}

/// One page of a filtered collection plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    AdminPage = Page<crate::models::AdminResponse>,
    TutorPage = Page<crate::models::Tutor>,
    BookingPage = Page<crate::models::Booking>,
    PartnerPage = Page<crate::models::Partner>,
    TestimonialPage = Page<crate::models::Testimonial>,
    OtherServicePage = Page<crate::models::OtherService>
)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(request, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_missing_or_zero() {
        let req = PageRequest::new(None, None);
        assert_eq!((req.page(), req.limit(), req.offset()), (1, 10, 0));

        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!((req.page(), req.limit()), (1, 10));

        let req = PageRequest::new(Some(-3), Some(-1));
        assert_eq!((req.page(), req.limit()), (1, 10));
    }

    #[test]
    fn test_offset_is_derived_from_page_and_limit() {
        let req = PageRequest::new(Some(3), Some(25));
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn test_limit_is_clamped() {
        let req = PageRequest::new(Some(1), Some(10_000));
        assert_eq!(req.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_huge_page_is_clamped_without_overflow() {
        let req = PageRequest::new(Some(i64::MAX), Some(MAX_LIMIT));
        assert_eq!(req.page(), MAX_PAGE);
        assert_eq!(req.offset(), (MAX_PAGE - 1) * MAX_LIMIT);

        let meta = PaginationMeta::new(PageRequest::new(Some(i64::MAX), Some(10)), 3);
        assert_eq!(meta.previous_page, Some(MAX_PAGE - 1));
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn test_meta_second_page_of_fifteen() {
        let meta = PaginationMeta::new(PageRequest::new(Some(2), Some(10)), 15);
        assert_eq!(meta.total, 15);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.offset, 10);
        assert_eq!(meta.previous_page, Some(1));
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn test_meta_empty_collection() {
        let meta = PaginationMeta::new(PageRequest::default(), 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.previous_page, None);
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn test_meta_exact_multiple() {
        let meta = PaginationMeta::new(PageRequest::new(Some(1), Some(5)), 20);
        assert_eq!(meta.total_pages, 4);
        assert_eq!(meta.next_page, Some(2));
    }
}
