//! Offset/limit pagination and sort-order resolution for list endpoints.

/// Resolved offset/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

/// Resolve page/size query params into offset/limit.
///
/// Pages are 1-based; zero or negative values fall back to the minimum.
pub fn get_pagination(page: Option<i64>, size: Option<i64>) -> Pagination {
    let page = page.unwrap_or(1).max(1);
    let limit = size.unwrap_or(20).max(1);
    Pagination {
        limit,
        offset: (page - 1) * limit,
    }
}

/// Sort direction for list queries. Defaults to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Resolve from a query parameter; anything but DESC (case-insensitive)
    /// is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("DESC") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = get_pagination(None, None);
        assert_eq!(p, Pagination { limit: 20, offset: 0 });
    }

    #[test]
    fn test_offset_math() {
        let p = get_pagination(Some(2), Some(20));
        assert_eq!(p.offset, 20);
        assert_eq!(p.limit, 20);

        let p = get_pagination(Some(3), Some(5));
        assert_eq!(p.offset, 10);
        assert_eq!(p.limit, 5);
    }

    #[test]
    fn test_clamps_to_minimums() {
        let p = get_pagination(Some(0), Some(0));
        assert_eq!(p, Pagination { limit: 1, offset: 0 });

        let p = get_pagination(Some(-3), Some(-10));
        assert_eq!(p, Pagination { limit: 1, offset: 0 });
    }

    #[test]
    fn test_sort_order_default_is_asc() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("bogus")), SortOrder::Asc);
    }

    #[test]
    fn test_sort_order_desc_case_insensitive() {
        assert_eq!(SortOrder::from_param(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
    }
}
