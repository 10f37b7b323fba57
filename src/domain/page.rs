use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::{PageLimit, PageNumber};

/// A filter value forwarded verbatim to the list endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Blank text filters are treated as "not set".
    pub fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl FilterValue {
    /// Reads a value typed on a command line: booleans and integers keep
    /// their type, anything else is text.
    pub fn parse_loose(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(flag) = raw.parse::<bool>() {
            return FilterValue::Flag(flag);
        }
        if let Ok(n) = raw.parse::<i64>() {
            return FilterValue::Integer(n);
        }
        FilterValue::Text(raw.to_string())
    }
}

/// Opaque key/value filters, kept sorted so requests are deterministic.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used when composing a patch.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Merges `patch` into `self`. Blank text values remove the key.
    pub fn merge(&mut self, patch: Filters) {
        for (key, value) in patch.0 {
            if value.is_blank() {
                self.0.remove(&key);
            } else {
                self.0.insert(key, value);
            }
        }
    }
}

impl FromIterator<(String, FilterValue)> for Filters {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The `(page, limit, filters)` tuple identifying one requested slice.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub limit: PageLimit,
    pub filters: Filters,
}

impl PageRequest {
    pub fn new(page: PageNumber, limit: PageLimit) -> Self {
        Self {
            page,
            limit,
            filters: Filters::new(),
        }
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Zero-based offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page.get() - 1) * self.limit.get()
    }
}

/// One page of rows plus the total across all pages for the filter set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub rows: Vec<T>,
    pub total: usize,
}

impl<T> PageResult<T> {
    pub fn new(rows: Vec<T>, total: usize) -> Self {
        Self { rows, total }
    }

    /// The fail-empty state.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parsing_keeps_flags_and_integers() {
        assert_eq!(FilterValue::parse_loose("true"), FilterValue::Flag(true));
        assert_eq!(FilterValue::parse_loose(" 42 "), FilterValue::Integer(42));
        assert_eq!(FilterValue::parse_loose("4.5"), FilterValue::from("4.5"));
        assert_eq!(FilterValue::parse_loose("Dr Smith"), FilterValue::from("Dr Smith"));
    }

    #[test]
    fn merge_overrides_and_clears_blank_keys() {
        let mut filters = Filters::new().with("search", "cardio").with("status", "paid");
        filters.merge(Filters::new().with("search", "  ").with("from", "2024-01-01"));

        assert_eq!(filters.get("search"), None);
        assert_eq!(filters.get("status"), Some(&FilterValue::from("paid")));
        assert_eq!(filters.get("from"), Some(&FilterValue::from("2024-01-01")));
    }

    #[test]
    fn offset_is_zero_based() {
        let request = PageRequest::new(PageNumber::new(3).unwrap(), PageLimit::new(5).unwrap());
        assert_eq!(request.offset(), 10);
    }
}
