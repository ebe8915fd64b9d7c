//
//  github-rest
//  api/github/pulls.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request endpoints and types.
//!
//! # Pull Request States
//!
//! * `open` - Accepting reviews and commits
//! * `closed` - Closed; [`PullRequest::merged_at`] is set when it was merged
//!
//! # Merge Methods
//!
//! * `merge` - Merge commit (default)
//! * `squash` - Squash all commits into one
//! * `rebase` - Rebase commits onto the base branch
//!
//! # Notes
//!
//! - `mergeable` is computed asynchronously by GitHub and may be `null` on
//!   the first fetch of a freshly pushed pull request
//! - Listing endpoints return a reduced shape without the diff statistics

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{found, repo_path, DiffFile, RepoCommit, PAGINATION_PARAMS};
use crate::api::common::{ApiError, Label, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /repos/{owner}/{repo}/pulls`.
pub const PULL_LIST_PARAMS: &[&str] = &[
    "state",
    "head",
    "base",
    "sort",
    "direction",
    "per_page",
    "page",
];

/// One side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRef {
    /// `owner:branch`.
    pub label: String,

    #[serde(rename = "ref")]
    pub ref_name: String,

    pub sha: String,

    #[serde(default)]
    pub user: Option<SimpleUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,

    pub number: u64,

    pub title: String,

    pub state: String,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub user: Option<SimpleUser>,

    pub head: PullRef,

    pub base: PullRef,

    #[serde(default)]
    pub draft: bool,

    /// Only present on single pull request responses.
    #[serde(default)]
    pub merged: Option<bool>,

    #[serde(default)]
    pub mergeable: Option<bool>,

    #[serde(default)]
    pub merged_at: Option<String>,

    #[serde(default)]
    pub labels: Vec<Label>,

    #[serde(default)]
    pub requested_reviewers: Vec<SimpleUser>,

    #[serde(default)]
    pub commits: Option<u64>,

    #[serde(default)]
    pub additions: Option<u64>,

    #[serde(default)]
    pub deletions: Option<u64>,

    #[serde(default)]
    pub changed_files: Option<u64>,

    pub html_url: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged.unwrap_or(false) || self.merged_at.is_some()
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePullRequest {
    pub title: String,

    /// Branch with the changes, `branch` or `owner:branch` for forks.
    pub head: String,

    /// Branch to merge into.
    pub base: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePullRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

/// Body of `PUT /repos/{owner}/{repo}/pulls/{number}/merge`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergePullRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,

    /// Head SHA the merge must match, guarding against concurrent pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    /// `merge`, `squash` or `rebase`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    #[serde(default)]
    pub sha: Option<String>,
    pub merged: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,

    #[serde(default)]
    pub user: Option<SimpleUser>,

    #[serde(default)]
    pub body: Option<String>,

    /// `APPROVED`, `CHANGES_REQUESTED`, `COMMENTED`, `DISMISSED` or `PENDING`.
    pub state: String,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/pulls`
    pub async fn list_pulls(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<PullRequest>, ApiError> {
        let query = assemble_query_params(params, PULL_LIST_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/pulls"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}`
    pub async fn get_pull(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest, ApiError> {
        let path = repo_path(owner, repo, &format!("/pulls/{}", number));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `POST /repos/{owner}/{repo}/pulls`
    pub async fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        request: &CreatePullRequest,
    ) -> Result<PullRequest, ApiError> {
        self.post(&self.endpoint_url(&repo_path(owner, repo, "/pulls"), ""), request)
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/pulls/{number}`
    pub async fn update_pull(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: &UpdatePullRequest,
    ) -> Result<PullRequest, ApiError> {
        let path = repo_path(owner, repo, &format!("/pulls/{}", number));
        self.patch(&self.endpoint_url(&path, ""), request).await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}/commits`
    pub async fn list_pull_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        params: Option<&QueryParams>,
    ) -> Result<Vec<RepoCommit>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = repo_path(owner, repo, &format!("/pulls/{}/commits", number));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}/files`
    pub async fn list_pull_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        params: Option<&QueryParams>,
    ) -> Result<Vec<DiffFile>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = repo_path(owner, repo, &format!("/pulls/{}/files", number));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}/merge`
    ///
    /// GitHub answers `204` when merged and `404` otherwise.
    pub async fn is_pull_merged(&self, owner: &str, repo: &str, number: u64) -> Result<bool, ApiError> {
        let path = repo_path(owner, repo, &format!("/pulls/{}/merge", number));
        found(self.get(&self.endpoint_url(&path, "")).await)
    }

    /// `PUT /repos/{owner}/{repo}/pulls/{number}/merge`
    pub async fn merge_pull(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: &MergePullRequest,
    ) -> Result<MergeResult, ApiError> {
        let path = repo_path(owner, repo, &format!("/pulls/{}/merge", number));
        self.put(&self.endpoint_url(&path, ""), Some(request)).await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
    pub async fn list_pull_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Review>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = repo_path(owner, repo, &format!("/pulls/{}/reviews", number));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `POST /repos/{owner}/{repo}/pulls/{number}/requested_reviewers`
    pub async fn request_reviewers(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        reviewers: &[&str],
        team_reviewers: &[&str],
    ) -> Result<PullRequest, ApiError> {
        let path = repo_path(owner, repo, &format!("/pulls/{}/requested_reviewers", number));
        let body = json!({ "reviewers": reviewers, "team_reviewers": team_reviewers });
        self.post(&self.endpoint_url(&path, ""), &body).await
    }

    /// Closes a pull request without merging.
    pub async fn close_pull(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest, ApiError> {
        let request = UpdatePullRequest {
            state: Some("closed".to_string()),
            ..Default::default()
        };
        self.update_pull(owner, repo, number, &request).await
    }

    /// Per-file patches of a pull request joined into one text.
    ///
    /// Only the first page of files is fetched. Binary files carry no patch
    /// and are skipped.
    pub async fn pull_patches(&self, owner: &str, repo: &str, number: u64) -> Result<String, ApiError> {
        let files = self.list_pull_files(owner, repo, number, None).await?;
        Ok(files
            .iter()
            .filter_map(|file| {
                file.patch
                    .as_ref()
                    .map(|patch| format!("--- {}\n{}", file.filename, patch))
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};
    use serde_json::Value;

    fn pull_json(number: u64) -> Value {
        json!({
            "id": number + 1000,
            "number": number,
            "title": "Add feature",
            "state": "open",
            "head": {"label": "octo:feature", "ref": "feature", "sha": "abc123"},
            "base": {"label": "octo:main", "ref": "main", "sha": "def456"},
            "html_url": format!("https://github.com/octo/hello/pull/{}", number)
        })
    }

    #[tokio::test]
    async fn test_list_pulls() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/pulls")
            .match_query(Matcher::Exact("state=closed&base=main".to_string()))
            .with_status(200)
            .with_body(json!([pull_json(5)]).to_string())
            .create_async()
            .await;

        let params = QueryParams::new().set("base", "main").set("state", "closed");
        let pulls = client(&server.url())
            .list_pulls("octo", "hello", Some(&params))
            .await
            .unwrap();

        assert_eq!(pulls[0].head.ref_name, "feature");
        assert!(!pulls[0].is_merged());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_is_pull_merged_maps_status() {
        let mut server = Server::new_async().await;
        let _merged = server
            .mock("GET", "/repos/octo/hello/pulls/1/merge")
            .with_status(204)
            .create_async()
            .await;
        let _open = server
            .mock("GET", "/repos/octo/hello/pulls/2/merge")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;
        let _denied = server
            .mock("GET", "/repos/octo/hello/pulls/3/merge")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        assert!(client.is_pull_merged("octo", "hello", 1).await.unwrap());
        assert!(!client.is_pull_merged("octo", "hello", 2).await.unwrap());

        let err = client.is_pull_merged("octo", "hello", 3).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_merge_pull_sends_method() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/octo/hello/pulls/5/merge")
            .match_body(Matcher::Json(json!({"merge_method": "squash"})))
            .with_status(200)
            .with_body(r#"{"sha": "f00", "merged": true, "message": "Pull Request successfully merged"}"#)
            .create_async()
            .await;

        let request = MergePullRequest {
            merge_method: Some("squash".to_string()),
            ..Default::default()
        };
        let result = client(&server.url())
            .merge_pull("octo", "hello", 5, &request)
            .await
            .unwrap();

        assert!(result.merged);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_close_pull_patches_state() {
        let mut server = Server::new_async().await;
        let mut closed = pull_json(7);
        closed["state"] = json!("closed");
        let mock = server
            .mock("PATCH", "/repos/octo/hello/pulls/7")
            .match_body(Matcher::Json(json!({"state": "closed"})))
            .with_status(200)
            .with_body(closed.to_string())
            .create_async()
            .await;

        let pull = client(&server.url())
            .close_pull("octo", "hello", 7)
            .await
            .unwrap();

        assert_eq!(pull.state, "closed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_reviewers_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/octo/hello/pulls/5/requested_reviewers")
            .match_body(Matcher::Json(json!({"reviewers": ["alice"], "team_reviewers": []})))
            .with_status(201)
            .with_body(pull_json(5).to_string())
            .create_async()
            .await;

        client(&server.url())
            .request_reviewers("octo", "hello", 5, &["alice"], &[])
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
