//! Query string specification and URL assembly.
//!
//! Values are written verbatim: no percent-encoding is applied, so callers
//! must pre-encode anything that is not URL-safe.

use serde::Serialize;

use crate::Result;

/// A single query value: one string, or a list joined with `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Written as-is.
    Single(String),
    /// Elements joined with `,`.
    List(Vec<String>),
}

impl QueryValue {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Single(value) => out.push_str(value),
            Self::List(values) => out.push_str(&values.join(",")),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryValue {
    fn from(values: Vec<S>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for QueryValue {
    fn from(values: [S; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Query specification for GET/HEAD requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Ordered key/value pairs, rendered as `k=v` joined with `&`.
    Pairs(Vec<(String, QueryValue)>),
    /// A preformatted query string, with or without a leading `?`.
    Raw(String),
}

impl Query {
    /// Creates an empty pairs query.
    #[must_use]
    pub const fn new() -> Self {
        Self::Pairs(Vec::new())
    }

    /// Appends a pair. On a raw query the pair is appended to the raw text.
    #[must_use]
    pub fn pair(self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        match self {
            Self::Pairs(mut pairs) => {
                pairs.push((key.into(), value.into()));
                Self::Pairs(pairs)
            }
            Self::Raw(raw) => {
                let mut out = raw.strip_prefix('?').unwrap_or(&raw).to_string();
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key.into());
                out.push('=');
                value.into().write_to(&mut out);
                Self::Raw(out)
            }
        }
    }

    /// Builds a pairs query from any value serializing to a flat JSON object.
    ///
    /// Strings are written as-is, numbers and booleans through their JSON
    /// text, arrays are joined with `,`, and `null` fields are skipped. Keys
    /// come out in `serde_json`'s map order.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let serde_json::Value::Object(fields) = serde_json::to_value(value)? else {
            return Err(crate::Error::invalid_request(
                "query parameters must serialize to an object",
            ));
        };

        let pairs = fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::Array(items) => Some((
                    key,
                    QueryValue::List(items.into_iter().map(scalar_text).collect()),
                )),
                other => Some((key, QueryValue::Single(scalar_text(other)))),
            })
            .collect();

        Ok(Self::Pairs(pairs))
    }

    /// Renders the query without the leading `?`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Raw(raw) => raw.strip_prefix('?').unwrap_or(raw).to_string(),
            Self::Pairs(pairs) => {
                let mut out = String::new();
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        out.push('&');
                    }
                    out.push_str(key);
                    out.push('=');
                    value.write_to(&mut out);
                }
                out
            }
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Pairs(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn scalar_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Appends `query` to `url`.
///
/// No query, an empty pairs query, or an empty raw string leaves the URL
/// unchanged.
#[must_use]
pub fn append_query(url: &str, query: Option<&Query>) -> String {
    let rendered = query.map(Query::render).unwrap_or_default();
    if rendered.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn pairs_join_lists_with_commas() {
        let query = Query::new().pair("a", "1").pair("b", ["2", "3"]);
        insta::assert_snapshot!(append_query("/items", Some(&query)), @"/items?a=1&b=2,3");
    }

    #[test]
    fn raw_query_gets_a_single_question_mark() {
        check!(append_query("/items", Some(&Query::from("x=1"))) == "/items?x=1");
        check!(append_query("/items", Some(&Query::from("?x=1"))) == "/items?x=1");
    }

    #[test]
    fn missing_or_empty_query_leaves_url_alone() {
        check!(append_query("/items", None) == "/items");
        check!(append_query("/items", Some(&Query::new())) == "/items");
        check!(append_query("/items", Some(&Query::from(""))) == "/items");
    }

    #[test]
    fn values_are_not_percent_encoded() {
        let query: Query = [("q", "a b&c")].into_iter().collect();
        check!(query.render() == "q=a b&c");
    }

    #[test]
    fn pair_on_raw_query_keeps_raw_text() {
        let query = Query::from("?x=1").pair("y", "2").pair("z", ["3", "4"]);
        check!(query.render() == "x=1&y=2&z=3,4");
        check!(append_query("/items", Some(&query)) == "/items?x=1&y=2&z=3,4");

        check!(Query::from("").pair("y", "2").render() == "y=2");
    }

    #[test]
    fn from_serialize_flattens_fields() {
        #[derive(Serialize)]
        struct Search {
            q: String,
            page: u32,
            tags: Vec<String>,
            cursor: Option<String>,
            exact: bool,
        }

        let query = Query::from_serialize(&Search {
            q: "rust".to_string(),
            page: 2,
            tags: vec!["http".to_string(), "async".to_string()],
            cursor: None,
            exact: true,
        })
        .expect("object");

        let rendered = query.render();
        let mut pairs: Vec<_> = rendered.split('&').collect();
        pairs.sort_unstable();
        check!(pairs == ["exact=true", "page=2", "q=rust", "tags=http,async"]);
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        let err = Query::from_serialize(&vec![1, 2]).expect_err("array is not a query");
        check!(err.to_string().contains("must serialize to an object"));
    }
}
