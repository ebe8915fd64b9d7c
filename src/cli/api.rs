//
//  github-rest
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Raw API Command
//!
//! `ghr api` hands an arbitrary endpoint straight to the request dispatcher,
//! with the same authentication, verb validation and error normalization the
//! typed endpoints get.
//!
//! ## Examples
//!
//! ```bash
//! # GET with query parameters
//! ghr api /repos/rust-lang/rust/issues -q state=open -q per_page=5
//!
//! # Placeholders are filled from the repository context
//! ghr api repos/{owner}/{repo}/labels
//!
//! # POST a JSON body built from typed fields
//! ghr api repos/{owner}/{repo}/issues -X POST -F title=Bug -F labels='["bug"]'
//!
//! # Nested keys via dots
//! ghr api repos/{owner}/{repo}/pages -X POST -F source.branch=main
//!
//! # Show status, headers and the rate-limit budget
//! ghr api /user --include
//! ```
//!
//! ## Fields
//!
//! `-F` values are typed: `true`, `false`, `null`, integers, floats and JSON
//! arrays or objects are sent as such; anything else is a string. `-f` always
//! sends a string. For `GET` and `DELETE` fields become query parameters.

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use serde_json::{Map, Value};

use crate::api::query::{assemble_query_params_with, FalsyPolicy, QueryParams};
use crate::api::{ApiError, ExtendedResponse, Verb};
use crate::util::parse_key_value;

use super::GlobalOptions;

/// Make an authenticated API request
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Endpoint path (e.g. /user or repos/{owner}/{repo}) or a full URL
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Typed field (key=value)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// String field (key=value)
    #[arg(long, short = 'f', action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Query parameter (key=value)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Read the JSON body from a file ("-" for stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Print response status, headers and rate limit
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Do not print the response body
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let endpoint = self.expand_placeholders(global, &config)?;

        // Unknown verbs fall through to the dispatcher, which rejects them
        // before sending anything.
        let sends_body = Verb::parse(&self.method)
            .map(|verb| verb.carries_body())
            .unwrap_or(false);

        let fields = self.collect_fields()?;
        let mut query_pairs = self.query_pairs()?;
        let body = if sends_body {
            self.build_body(fields)?
        } else {
            query_pairs.extend(fields.into_iter().map(|(key, value)| (key, query_text(&value))));
            None
        };

        let url = with_query(&endpoint, &encode_pairs(&query_pairs));
        let client = super::client_for(config)?;

        let result = client
            .extended_request::<Value, Value>(&url, &self.method, body.as_ref())
            .await;

        match result {
            Ok(response) => self.print_response(response),
            Err(err) => {
                if let ApiError::Http {
                    body: Some(body), ..
                } = &err
                {
                    if !self.silent {
                        println!("{}", serde_json::to_string_pretty(body)?);
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Replaces `{owner}` and `{repo}` with the resolved repository.
    fn expand_placeholders(&self, global: &GlobalOptions, config: &crate::config::Config) -> Result<String> {
        let endpoint = normalize_endpoint(&self.endpoint);
        if !endpoint.contains("{owner}") && !endpoint.contains("{repo}") {
            return Ok(endpoint);
        }
        let ctx = global.repo_context(config, None)?;
        Ok(endpoint
            .replace("{owner}", &ctx.owner)
            .replace("{repo}", &ctx.repo))
    }

    fn collect_fields(&self) -> Result<Vec<(String, Value)>> {
        let mut fields = Vec::new();
        for field in &self.field {
            let (key, value) = parse_key_value(field)?;
            fields.push((key.to_string(), parse_typed_value(value)));
        }
        for field in &self.raw_field {
            let (key, value) = parse_key_value(field)?;
            fields.push((key.to_string(), Value::String(value.to_string())));
        }
        Ok(fields)
    }

    fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        self.query
            .iter()
            .map(|pair| {
                let (key, value) = parse_key_value(pair)?;
                Ok((key.to_string(), value.to_string()))
            })
            .collect()
    }

    fn build_body(&self, fields: Vec<(String, Value)>) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            if !fields.is_empty() {
                bail!("--input cannot be combined with --field or --raw-field");
            }
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(Some(serde_json::from_str(&content)?));
        }

        if fields.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        for (key, value) in fields {
            set_nested_value(&mut body, &key, value);
        }
        Ok(Some(Value::Object(body)))
    }

    fn print_response(&self, response: ExtendedResponse<Value>) -> Result<()> {
        if self.include {
            println!("{} {}", style("HTTP").dim(), response.status);
            let mut names: Vec<&str> = response.headers.keys().map(|name| name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            for name in names {
                for value in response.headers.get_all(name) {
                    println!("{}: {}", name, value.to_str().unwrap_or(""));
                }
            }
            if let Some(rate) = response.rate_limit() {
                let remaining = rate.remaining.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
                let limit = rate.limit.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
                println!("{} {}/{} remaining", style("Rate limit:").dim(), remaining, limit);
            }
            println!();
        }

        if self.silent || response.body.is_null() {
            return Ok(());
        }
        println!("{}", serde_json::to_string_pretty(&response.body)?);
        Ok(())
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") || endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    }
}

/// Parses a `-F` value into JSON.
fn parse_typed_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = value.parse::<i64>() {
                Value::Number(n.into())
            } else if let Ok(n) = value.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(value.to_string()))
            } else if value.starts_with('[') || value.starts_with('{') {
                serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
            } else {
                Value::String(value.to_string())
            }
        }
    }
}

/// Inserts `value` at a dotted key path, creating objects as needed.
fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

fn query_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Encodes pairs in the order given. Every pair the user typed is sent,
/// falsy or not; a repeated key keeps its last value.
fn encode_pairs(pairs: &[(String, String)]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for (key, _) in pairs {
        if !names.contains(&key.as_str()) {
            names.push(key);
        }
    }
    let params: QueryParams = pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assemble_query_params_with(Some(&params), &names, FalsyPolicy::Include)
}

fn with_query(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_string()
    } else if endpoint.contains('?') {
        format!("{}&{}", endpoint, query)
    } else {
        format!("{}?{}", endpoint, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_typed_value() {
        assert_eq!(parse_typed_value("true"), json!(true));
        assert_eq!(parse_typed_value("null"), Value::Null);
        assert_eq!(parse_typed_value("42"), json!(42));
        assert_eq!(parse_typed_value("1.5"), json!(1.5));
        assert_eq!(parse_typed_value("[\"bug\"]"), json!(["bug"]));
        assert_eq!(parse_typed_value("[not json"), json!("[not json"));
        assert_eq!(parse_typed_value("hello"), json!("hello"));
    }

    #[test]
    fn test_set_nested_value() {
        let mut body = Map::new();
        set_nested_value(&mut body, "source.branch", json!("main"));
        set_nested_value(&mut body, "source.path", json!("/docs"));
        set_nested_value(&mut body, "public", json!(true));
        assert_eq!(
            Value::Object(body),
            json!({"source": {"branch": "main", "path": "/docs"}, "public": true})
        );
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("user"), "/user");
        assert_eq!(normalize_endpoint("/user"), "/user");
        assert_eq!(
            normalize_endpoint("https://ghe.corp.io/api/v3/user"),
            "https://ghe.corp.io/api/v3/user"
        );
    }

    #[test]
    fn test_encode_pairs_keeps_order_and_falsy_values() {
        let pairs = vec![
            ("state".to_string(), "open".to_string()),
            ("page".to_string(), "0".to_string()),
            ("q".to_string(), "is:open bug".to_string()),
            ("state".to_string(), "closed".to_string()),
        ];
        assert_eq!(encode_pairs(&pairs), "state=closed&page=0&q=is%3Aopen%20bug");
    }

    #[test]
    fn test_encode_pairs_encodes_names() {
        let pairs = vec![("a b".to_string(), "1".to_string())];
        assert_eq!(encode_pairs(&pairs), "a%20b=1");
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/user", ""), "/user");
        assert_eq!(with_query("/search/issues", "q=a"), "/search/issues?q=a");
        assert_eq!(with_query("/search/issues?sort=created", "q=a"), "/search/issues?sort=created&q=a");
    }
}
