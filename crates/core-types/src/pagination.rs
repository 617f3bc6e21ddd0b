//! Page arithmetic and the list response envelope.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Raw `page` / `per_page` query parameters. Kept as strings so that a
/// malformed value falls back to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageQuery {
    /// Builds the query from decoded key/value pairs. A repeated key keeps
    /// its first value; unrelated keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "per_page" if query.per_page.is_none() => query.per_page = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// The envelope every list endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages<T> {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Pages<T> {
    /// Normalizes the requested page against the total number of rows.
    ///
    /// A negative `total` means "unknown": `page_count` becomes -1 and the page
    /// is not clamped from above.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let mut per_page = per_page;
        if per_page <= 0 {
            per_page = DEFAULT_PAGE_SIZE;
        }
        if per_page > MAX_PAGE_SIZE {
            per_page = MAX_PAGE_SIZE;
        }

        let mut page = page;
        let mut page_count = -1;
        if total >= 0 {
            page_count = (total + per_page - 1) / per_page;
            if page > page_count {
                page = page_count;
            }
        }
        if page < 1 {
            page = 1;
        }

        Self {
            page,
            per_page,
            page_count,
            total_count: total,
            items: Vec::new(),
        }
    }

    pub fn from_query(query: &PageQuery, total: i64) -> Self {
        let page = parse_or(query.page.as_deref(), 1);
        let per_page = parse_or(query.per_page.as_deref(), DEFAULT_PAGE_SIZE);
        Self::new(page, per_page, total)
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Attaches the fetched rows, keeping the page metadata.
    pub fn with_items<U>(self, items: Vec<U>) -> Pages<U> {
        Pages {
            page: self.page,
            per_page: self.per_page,
            page_count: self.page_count,
            total_count: self.total_count,
            items,
        }
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    match value {
        Some(v) if !v.is_empty() => v.parse().unwrap_or(default),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(page: i64, per_page: i64, total: i64) -> Pages<()> {
        Pages::new(page, per_page, total)
    }

    #[test]
    fn new_computes_page_metadata() {
        let cases = [
            // (page, per_page, total) => (page, per_page, page_count, offset, limit)
            ((2, 20, 50), (2, 20, 3, 20, 20)),
            ((1, 20, 50), (1, 20, 3, 0, 20)),
            ((10, 20, 50), (3, 20, 3, 40, 20)),
            ((0, 20, 50), (1, 20, 3, 0, 20)),
            ((-3, 20, 50), (1, 20, 3, 0, 20)),
            ((2, 0, 50), (1, 100, 1, 0, 100)),
            ((2, -5, 250), (2, 100, 3, 100, 100)),
            ((1, 5000, 10), (1, 1000, 1, 0, 1000)),
            ((4, 20, -1), (4, 20, -1, 60, 20)),
            ((1, 20, 0), (1, 20, 0, 0, 20)),
        ];

        for ((page, per_page, total), (want_page, want_per_page, want_count, want_offset, want_limit)) in cases {
            let p = pages(page, per_page, total);
            assert_eq!(p.page, want_page, "page for {:?}", (page, per_page, total));
            assert_eq!(p.per_page, want_per_page, "per_page for {:?}", (page, per_page, total));
            assert_eq!(p.page_count, want_count, "page_count for {:?}", (page, per_page, total));
            assert_eq!(p.offset(), want_offset, "offset for {:?}", (page, per_page, total));
            assert_eq!(p.limit(), want_limit, "limit for {:?}", (page, per_page, total));
            assert_eq!(p.total_count, total);
        }
    }

    #[test]
    fn from_query_falls_back_to_defaults() {
        let empty = PageQuery::default();
        let p: Pages<()> = Pages::from_query(&empty, 250);
        assert_eq!((p.page, p.per_page), (1, 100));

        let garbage = PageQuery { page: Some("abc".into()), per_page: Some("".into()) };
        let p: Pages<()> = Pages::from_query(&garbage, 250);
        assert_eq!((p.page, p.per_page), (1, 100));

        let explicit = PageQuery { page: Some("2".into()), per_page: Some("10".into()) };
        let p: Pages<()> = Pages::from_query(&explicit, 25);
        assert_eq!((p.page, p.per_page, p.page_count), (2, 10, 3));
    }

    #[test]
    fn from_pairs_keeps_the_first_value_of_a_repeated_key() {
        let pairs = [("page", "1"), ("sort", "name"), ("page", "2"), ("per_page", "5")]
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let query = PageQuery::from_pairs(pairs);
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.per_page.as_deref(), Some("5"));

        let none = PageQuery::from_pairs(Vec::new());
        assert!(none.page.is_none() && none.per_page.is_none());
    }

    #[test]
    fn with_items_keeps_metadata() {
        let p = pages(2, 20, 50).with_items(vec!["a", "b"]);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_count, 50);
        assert_eq!(p.items, vec!["a", "b"]);
    }
}
