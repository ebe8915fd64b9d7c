//
//  github-rest
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Query String Assembly
//!
//! Every endpoint forwards only the query parameters it knows about. The
//! caller hands over a loosely filled [`QueryParams`] bag and the endpoint
//! passes its own whitelist to [`assemble_query_params`], which produces the
//! query string fragment.
//!
//! ## Rules
//!
//! - Output has no leading `?` or `&`; pairs are joined by `&`
//! - Pairs appear in whitelist order, never in bag order
//! - Names missing from the whitelist are dropped silently
//! - Values are percent-encoded (a space becomes `%20`)
//! - Falsy values (`""`, `0`, `0.0`, `NaN`, `false`) are omitted unless
//!   [`FalsyPolicy::Include`] is requested
//!
//! ## Example
//!
//! ```rust
//! use github_rest::api::query::{assemble_query_params, QueryParams};
//!
//! let params = QueryParams::new()
//!     .set("page", 2)
//!     .set("sort", "created")
//!     .set("q", "is:open label:bug");
//!
//! assert_eq!(assemble_query_params(Some(&params), &["sort"]), "sort=created");
//! assert_eq!(
//!     assemble_query_params(Some(&params), &["q", "page"]),
//!     "q=is%3Aopen%20label%3Abug&page=2"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl QueryValue {
    /// Whether the value counts as "absent" under the falsy-omission rule.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(n) => *n == 0,
            Self::Float(f) => *f == 0.0 || f.is_nan(),
            Self::Bool(b) => !b,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Str(value.to_string()))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// An unordered bag of optional query parameters for a single call.
///
/// Built with a chaining API; [`QueryParams::set_opt`] makes it easy to
/// forward `Option` fields without branching.
///
/// ```rust
/// use github_rest::api::query::QueryParams;
///
/// let state: Option<&str> = None;
/// let params = QueryParams::new().set("per_page", 50).set_opt("state", state);
///
/// assert_eq!(params.len(), 1);
/// assert!(params.get("state").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: HashMap<String, QueryValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter only when `value` is `Some`.
    pub fn set_opt<V: Into<QueryValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// How falsy values are treated during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FalsyPolicy {
    /// Drop `""`, `0`, `0.0`, `NaN` and `false` as if absent.
    #[default]
    Omit,
    /// Forward every present value, falsy or not.
    Include,
}

/// Builds a query string fragment from a parameter bag and a whitelist.
///
/// Uses [`FalsyPolicy::Omit`]; a legitimate `page=0` or `draft=false`
/// therefore cannot be sent through this function. Use
/// [`assemble_query_params_with`] for that.
///
/// # Example
///
/// ```rust
/// use github_rest::api::query::{assemble_query_params, QueryParams};
///
/// let params = QueryParams::new().set("page", 0).set("state", "open");
/// assert_eq!(assemble_query_params(Some(&params), &["page", "state"]), "state=open");
/// assert_eq!(assemble_query_params(None, &["page"]), "");
/// ```
pub fn assemble_query_params(params: Option<&QueryParams>, allowed: &[&str]) -> String {
    assemble_query_params_with(params, allowed, FalsyPolicy::Omit)
}

/// Builds a query string fragment using an explicit falsy policy.
pub fn assemble_query_params_with(
    params: Option<&QueryParams>,
    allowed: &[&str],
    policy: FalsyPolicy,
) -> String {
    let Some(params) = params else {
        return String::new();
    };

    allowed
        .iter()
        .filter_map(|name| {
            let value = params.get(name)?;
            if policy == FalsyPolicy::Omit && value.is_falsy() {
                return None;
            }
            Some(format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(&value.to_string())
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}
