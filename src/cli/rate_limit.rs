//
//  github-rest
//  cli/rate_limit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `ghr rate-limit`
//!
//! `GET /rate_limit` does not count against the budget it reports.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use serde::{Deserialize, Serialize};

use crate::api::NO_BODY;
use crate::output::{write_json, TableBuilder};
use crate::util::format_duration;

use super::GlobalOptions;

/// Show the current rate-limit budget
#[derive(Args, Debug)]
pub struct RateLimitCommand {
    /// Only show this resource (core, search, graphql, ...)
    #[arg(long, short = 'r')]
    pub resource: Option<String>,
}

/// One budget from the `resources` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateBucket {
    pub limit: u64,
    pub remaining: u64,
    #[serde(default)]
    pub used: u64,
    /// Unix seconds.
    pub reset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitOverview {
    #[serde(default)]
    pub resources: BTreeMap<String, RateBucket>,
}

impl RateLimitCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let response = client
            .extended_request::<RateLimitOverview, _>("/rate_limit", "get", NO_BODY)
            .await?;
        if let Some(rate) = response.rate_limit() {
            tracing::debug!(remaining = ?rate.remaining, limit = ?rate.limit, "core budget from headers");
        }

        let mut resources = response.into_body().resources;
        if let Some(name) = &self.resource {
            resources.retain(|key, _| key == name);
            if resources.is_empty() {
                anyhow::bail!("Unknown rate-limit resource '{}'", name);
            }
        }

        if output.is_json() {
            return write_json(&resources);
        }

        let now = Utc::now();
        let color = output.color_enabled();
        TableBuilder::new()
            .color(color)
            .headers(["RESOURCE", "USED", "REMAINING", "LIMIT", "RESETS IN"])
            .rows(
                resources
                    .iter()
                    .map(|(name, bucket)| bucket_row(name, bucket, now, color)),
            )
            .print();
        Ok(())
    }
}

fn resets_in(bucket: &RateBucket, now: DateTime<Utc>) -> String {
    let secs = bucket.reset.saturating_sub(now.timestamp()).max(0);
    format_duration(Duration::from_secs(secs.unsigned_abs()))
}

fn bucket_row(name: &str, bucket: &RateBucket, now: DateTime<Utc>, color: bool) -> Vec<String> {
    let remaining = bucket.remaining.to_string();
    let remaining = if color && bucket.remaining == 0 {
        style(remaining).red().bold().to_string()
    } else {
        remaining
    };
    vec![
        name.to_string(),
        bucket.used.to_string(),
        remaining,
        bucket.limit.to_string(),
        resets_in(bucket, now),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GitHubClient;
    use crate::config::Config;
    use mockito::Server;

    #[test]
    fn test_resets_in() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let bucket = RateBucket {
            limit: 5000,
            remaining: 4999,
            used: 1,
            reset: 1_700_000_000 + 125,
        };
        assert_eq!(resets_in(&bucket, now), "2m 5s");

        let expired = RateBucket { reset: 1_600_000_000, ..bucket };
        assert_eq!(resets_in(&expired, now), "0s");
    }

    #[tokio::test]
    async fn test_overview_decodes_resources() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rate_limit")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-ratelimit-remaining", "4999")
            .with_body(
                r#"{"resources": {
                    "core": {"limit": 5000, "remaining": 4999, "used": 1, "reset": 1700000000},
                    "search": {"limit": 30, "remaining": 30, "reset": 1700000060}
                }, "rate": {"limit": 5000, "remaining": 4999, "reset": 1700000000}}"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(Config {
            host: server.url(),
            ..Config::default()
        })
        .unwrap();
        let response = client
            .extended_request::<RateLimitOverview, _>("/rate_limit", "get", NO_BODY)
            .await
            .unwrap();

        assert_eq!(response.rate_limit().unwrap().remaining, Some(4999));
        let resources = response.into_body().resources;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources["search"].used, 0);
        mock.assert_async().await;
    }
}
