//
//  github-rest
//  api/github/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue endpoints and types.
//!
//! GitHub treats every pull request as an issue, so issue listings include
//! pull requests too. [`Issue::is_pull_request`] tells them apart.
//!
//! # Issue States
//!
//! * `open` - Default state on creation
//! * `closed` - Closed, with an optional `state_reason` of `completed`,
//!   `not_planned` or `reopened`
//!
//! # Example
//!
//! ```rust,no_run
//! use github_rest::api::github::CreateIssueRequest;
//! use github_rest::api::GitHubClient;
//!
//! # async fn example(client: &GitHubClient) -> Result<(), github_rest::api::ApiError> {
//! let request = CreateIssueRequest {
//!     title: "Login button not responding".to_string(),
//!     body: Some("Steps to reproduce:\n1. Open the login page".to_string()),
//!     labels: vec!["bug".to_string()],
//!     ..Default::default()
//! };
//! let issue = client.create_issue("octo", "hello", &request).await?;
//! println!("opened #{}", issue.number);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{repo_path, PAGINATION_PARAMS};
use crate::api::common::{ApiError, Label, Milestone, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /repos/{owner}/{repo}/issues`.
pub const ISSUE_LIST_PARAMS: &[&str] = &[
    "milestone",
    "state",
    "assignee",
    "creator",
    "mentioned",
    "labels",
    "sort",
    "direction",
    "since",
    "per_page",
    "page",
];

pub const COMMENT_LIST_PARAMS: &[&str] = &["since", "per_page", "page"];

/// An issue (or pull request seen through the issues API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,

    /// Number within the repository, shared with pull requests.
    pub number: u64,

    pub title: String,

    /// `open` or `closed`.
    pub state: String,

    #[serde(default)]
    pub state_reason: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub user: Option<SimpleUser>,

    #[serde(default)]
    pub labels: Vec<Label>,

    #[serde(default)]
    pub assignees: Vec<SimpleUser>,

    #[serde(default)]
    pub milestone: Option<Milestone>,

    #[serde(default)]
    pub comments: u64,

    #[serde(default)]
    pub locked: bool,

    /// Present only when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<Value>,

    pub html_url: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub closed_at: Option<String>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIssueRequest {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Body of `PATCH /repos/{owner}/{repo}/issues/{number}`.
///
/// `labels` and `assignees` replace the existing sets when `Some`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateIssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub user: Option<SimpleUser>,

    pub html_url: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/issues`
    pub async fn list_repo_issues(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Issue>, ApiError> {
        let query = assemble_query_params(params, ISSUE_LIST_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/issues"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/issues/{number}`
    pub async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue, ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}", number));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `POST /repos/{owner}/{repo}/issues`
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateIssueRequest,
    ) -> Result<Issue, ApiError> {
        self.post(&self.endpoint_url(&repo_path(owner, repo, "/issues"), ""), request)
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/issues/{number}`
    pub async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: &UpdateIssueRequest,
    ) -> Result<Issue, ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}", number));
        self.patch(&self.endpoint_url(&path, ""), request).await
    }

    /// `PUT /repos/{owner}/{repo}/issues/{number}/lock`
    ///
    /// `reason` is one of `off-topic`, `too heated`, `resolved` or `spam`.
    pub async fn lock_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        reason: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}/lock", number));
        let body = reason.map(|reason| json!({ "lock_reason": reason }));
        self.put(&self.endpoint_url(&path, ""), body.as_ref()).await
    }

    /// `DELETE /repos/{owner}/{repo}/issues/{number}/lock`
    pub async fn unlock_issue(&self, owner: &str, repo: &str, number: u64) -> Result<(), ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}/lock", number));
        self.delete(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/issues/{number}/comments`
    pub async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        params: Option<&QueryParams>,
    ) -> Result<Vec<IssueComment>, ApiError> {
        let query = assemble_query_params(params, COMMENT_LIST_PARAMS);
        let path = repo_path(owner, repo, &format!("/issues/{}/comments", number));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `POST /repos/{owner}/{repo}/issues/{number}/comments`
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}/comments", number));
        self.post(&self.endpoint_url(&path, ""), &json!({ "body": body }))
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/issues/comments/{comment_id}`
    pub async fn update_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/comments/{}", comment_id));
        self.patch(&self.endpoint_url(&path, ""), &json!({ "body": body }))
            .await
    }

    /// `DELETE /repos/{owner}/{repo}/issues/comments/{comment_id}`
    pub async fn delete_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> Result<(), ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/comments/{}", comment_id));
        self.delete(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/labels`
    pub async fn list_labels(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Label>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/labels"), &query))
            .await
    }

    /// `POST /repos/{owner}/{repo}/issues/{number}/labels`
    ///
    /// Returns every label now on the issue.
    pub async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[&str],
    ) -> Result<Vec<Label>, ApiError> {
        let path = repo_path(owner, repo, &format!("/issues/{}/labels", number));
        self.post(&self.endpoint_url(&path, ""), &json!({ "labels": labels }))
            .await
    }
}
