//! Page/limit resolution for listing endpoints.
//!
//! Inputs arrive as raw query-string values. Anything that does not parse to
//! a positive integer silently falls back to the default, so resolution
//! never fails.

/// Page used when the request omits or garbles `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Limit used when the request omits or garbles `limit`.
pub const DEFAULT_LIMIT: i64 = 20;

/// Raw, unvalidated paging inputs as they appear in a query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams<'a> {
    pub page: Option<&'a str>,
    pub limit: Option<&'a str>,
}

/// Resolved paging window. `offset` is always derived from `page` and
/// `limit`; it cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl Pagination {
    /// Build a window from already-validated values. Non-positive inputs
    /// are replaced by the defaults.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = if page > 0 { page } else { DEFAULT_PAGE };
        let limit = if limit > 0 { limit } else { DEFAULT_LIMIT };
        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Resolve raw query values. `max_limit` clamps the page size when set.
    pub fn resolve(params: PageParams<'_>, max_limit: Option<i64>) -> Self {
        let page = parse_positive(params.page).unwrap_or(DEFAULT_PAGE);
        let mut limit = parse_positive(params.limit).unwrap_or(DEFAULT_LIMIT);
        if let Some(max) = max_limit.filter(|max| *max > 0) {
            limit = limit.min(max);
        }
        Self::new(page, limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
}

/// Number of pages needed to show `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(page: Option<&str>, limit: Option<&str>) -> Pagination {
        Pagination::resolve(PageParams { page, limit }, None)
    }

    #[test]
    fn missing_values_use_defaults() {
        let p = resolve(None, None);
        assert_eq!(p, Pagination { page: 1, limit: 20, offset: 0 });
    }

    #[test]
    fn garbage_and_non_positive_values_fall_back_per_field() {
        for raw in ["0", "-3", "abc", "", "1.5", " 2"] {
            let p = resolve(Some(raw), Some("5"));
            assert_eq!(p.page, DEFAULT_PAGE, "page input {raw:?}");
            assert_eq!(p.limit, 5);

            let p = resolve(Some("4"), Some(raw));
            assert_eq!(p.page, 4);
            assert_eq!(p.limit, DEFAULT_LIMIT, "limit input {raw:?}");
        }
    }

    #[test]
    fn offset_is_derived_from_page_and_limit() {
        let p = resolve(Some("3"), Some("25"));
        assert_eq!(p.offset, 50);

        let p = resolve(Some("1"), Some("7"));
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn max_limit_clamps_page_size() {
        let p = Pagination::resolve(
            PageParams {
                page: Some("2"),
                limit: Some("500"),
            },
            Some(100),
        );
        assert_eq!(p.limit, 100);
        assert_eq!(p.offset, 100);
    }

    #[test]
    fn huge_page_does_not_overflow_offset() {
        let p = resolve(Some(&i64::MAX.to_string()), Some("20"));
        assert_eq!(p.offset, i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(100, 7), 15);
    }
}
