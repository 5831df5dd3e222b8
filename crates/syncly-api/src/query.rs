// URL construction for REST calls: ordered query parameters, pagination,
// and joining path segments onto the session's base URL.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Ordered query parameters. Absent values are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append `key=value` only when a value is present.
    pub fn with_opt<T: Display>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Append `key=a,b,c`. An empty list adds nothing.
    pub fn with_list<T: Display>(self, key: &'static str, values: &[T]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.with(key, joined)
    }

    /// Append every field of `page` that is set.
    pub fn with_pagination(self, page: &Pagination) -> Self {
        self.with_opt("page", page.page)
            .with_opt("perpage", page.perpage)
            .with_opt("limit", page.limit)
            .with_opt("since", page.since)
            .with_opt("timeout", page.timeout)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Paging and cursor options shared by list-style endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub perpage: Option<u32>,
    pub limit: Option<u32>,
    pub since: Option<u64>,
    pub timeout: Option<u64>,
}

impl Pagination {
    pub fn page(page: u32, perpage: u32) -> Self {
        Self {
            page: Some(page),
            perpage: Some(perpage),
            ..Self::default()
        }
    }
}

/// Resolve `segments` under `base` and append `query`.
///
/// Each segment is percent-encoded on its own, so identifiers containing
/// `/` or spaces stay a single path component.
pub fn build_url(base: &Url, segments: &[&str], query: &Query) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.pairs() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:8384/rest/").unwrap()
    }

    #[test]
    fn absent_values_are_dropped() {
        let query = Query::new()
            .with("folder", "abcd-1234")
            .with_opt::<u32>("page", None)
            .with_list::<&str>("events", &[]);
        let url = build_url(&base(), &["db", "status"], &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8384/rest/db/status?folder=abcd-1234"
        );
    }

    #[test]
    fn lists_are_comma_joined() {
        let query = Query::new()
            .with("since", 7)
            .with_list("events", &["FolderSummary", "StateChanged"]);
        let url = build_url(&base(), &["events"], &query).unwrap();
        assert_eq!(url.query(), Some("since=7&events=FolderSummary%2CStateChanged"));
        assert_eq!(query.get("events"), Some("FolderSummary,StateChanged"));
    }

    #[test]
    fn base_without_trailing_slash_joins_cleanly() {
        let base = Url::parse("https://nas.local:8384/rest").unwrap();
        let url = build_url(&base, &["system", "status"], &Query::new()).unwrap();
        assert_eq!(url.as_str(), "https://nas.local:8384/rest/system/status");
    }

    #[test]
    fn identifiers_are_encoded_as_one_segment() {
        let url = build_url(&base(), &["config", "folders", "my docs/2024"], &Query::new()).unwrap();
        assert_eq!(url.path(), "/rest/config/folders/my%20docs%2F2024");
    }

    #[test]
    fn pagination_serializes_only_set_fields() {
        let query = Query::new().with_pagination(&Pagination::page(2, 50));
        assert_eq!(query.pairs(), &[("page", "2".to_owned()), ("perpage", "50".to_owned())]);
    }

    #[test]
    fn building_is_pure() {
        let query = Query::new().with("folder", "x");
        let a = build_url(&base(), &["db", "scan"], &query).unwrap();
        let b = build_url(&base(), &["db", "scan"], &query).unwrap();
        assert_eq!(a, b);
    }
}
