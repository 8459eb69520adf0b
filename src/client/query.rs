//! Query-string encoding shared by every list operation.
//!
//! Only values that are present and non-zero are encoded; absent filters are
//! left out of the URL rather than sent empty.

use chrono::{DateTime, Utc};

use crate::helpers::time::to_rfc3339_utc;
use crate::utils::constants::{QUERY_FROM_DATE, QUERY_PAGE, QUERY_PER_PAGE, QUERY_TO_DATE};

pub type QueryPairs = Vec<(&'static str, String)>;

/// Anything that can contribute query parameters to a request.
pub trait ToQuery {
    fn append_query(&self, pairs: &mut QueryPairs);

    fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        self.append_query(&mut pairs);
        pairs
    }
}

/// Page selection for list operations.
///
/// `page` starts at 1; the server bounds `per_page` (1 to 100, default 10).
/// `None` or `0` means "server default" for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

impl ToQuery for PageRequest {
    fn append_query(&self, pairs: &mut QueryPairs) {
        push_positive(pairs, QUERY_PAGE, self.page.map(u64::from));
        push_positive(pairs, QUERY_PER_PAGE, self.per_page.map(u64::from));
    }
}

/// Creation-date filter; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

impl ToQuery for DateRange {
    fn append_query(&self, pairs: &mut QueryPairs) {
        push_date(pairs, QUERY_FROM_DATE, self.from.as_ref());
        push_date(pairs, QUERY_TO_DATE, self.to.as_ref());
    }
}

pub(crate) fn push_positive(pairs: &mut QueryPairs, key: &'static str, value: Option<u64>) {
    if let Some(value) = value.filter(|v| *v > 0) {
        pairs.push((key, value.to_string()));
    }
}

pub(crate) fn push_id(pairs: &mut QueryPairs, key: &'static str, value: Option<i64>) {
    if let Some(value) = value.filter(|v| *v != 0) {
        pairs.push((key, value.to_string()));
    }
}

pub(crate) fn push_str(pairs: &mut QueryPairs, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_owned()));
    }
}

pub(crate) fn push_date(pairs: &mut QueryPairs, key: &'static str, value: Option<&DateTime<Utc>>) {
    if let Some(value) = value {
        pairs.push((key, to_rfc3339_utc(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_and_absent_values_are_omitted() {
        let page = PageRequest { page: Some(0), per_page: Some(0) };
        assert!(page.to_query().is_empty());
        assert!(PageRequest::default().to_query().is_empty());
        assert!(DateRange::default().to_query().is_empty());
    }

    #[test]
    fn page_and_per_page_are_encoded() {
        assert_eq!(
            PageRequest::new(2, 50).to_query(),
            vec![("page", "2".to_owned()), ("perPage", "50".to_owned())]
        );
    }

    #[test]
    fn date_range_is_rfc3339_utc() {
        let from = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let range = DateRange { from: Some(from), to: None };
        assert_eq!(range.to_query(), vec![("fromDate", "2023-01-01T00:00:00Z".to_owned())]);
    }
}
