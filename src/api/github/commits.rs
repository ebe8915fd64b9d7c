//
//  github-rest
//  api/github/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit endpoints and types.

use serde::{Deserialize, Serialize};

use super::{repo_path, segment, PAGINATION_PARAMS};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /repos/{owner}/{repo}/commits`.
pub const COMMIT_LIST_PARAMS: &[&str] = &[
    "sha",
    "path",
    "author",
    "committer",
    "since",
    "until",
    "per_page",
    "page",
];

/// Git-level author or committer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitActor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,

    #[serde(default)]
    pub author: Option<GitActor>,

    #[serde(default)]
    pub committer: Option<GitActor>,

    #[serde(default)]
    pub comment_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

/// A changed file in a commit, comparison or pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffFile {
    pub filename: String,

    /// `added`, `removed`, `modified`, `renamed`, `copied`, `changed` or
    /// `unchanged`.
    pub status: String,

    #[serde(default)]
    pub additions: u64,

    #[serde(default)]
    pub deletions: u64,

    #[serde(default)]
    pub changes: u64,

    /// Missing for binary files and very large diffs.
    #[serde(default)]
    pub patch: Option<String>,

    #[serde(default)]
    pub previous_filename: Option<String>,
}

/// A commit as returned by the repository commits API.
///
/// `author` and `committer` at the top level are GitHub accounts and are
/// `None` when the commit email is not linked to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCommit {
    pub sha: String,

    pub commit: CommitDetail,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub author: Option<SimpleUser>,

    #[serde(default)]
    pub committer: Option<SimpleUser>,

    /// Only on single commit responses.
    #[serde(default)]
    pub stats: Option<CommitStats>,

    #[serde(default)]
    pub files: Vec<DiffFile>,
}

impl RepoCommit {
    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }

    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// Result of comparing two commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// `diverged`, `ahead`, `behind` or `identical`.
    pub status: String,

    pub ahead_by: u64,

    pub behind_by: u64,

    pub total_commits: u64,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub commits: Vec<RepoCommit>,

    #[serde(default)]
    pub files: Vec<DiffFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// `error`, `failure`, `pending` or `success`.
    pub state: String,

    #[serde(default)]
    pub context: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub target_url: Option<String>,
}

/// The combined status of a ref across every status context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedStatus {
    pub state: String,

    pub sha: String,

    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub statuses: Vec<CommitStatus>,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/commits`
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<RepoCommit>, ApiError> {
        let query = assemble_query_params(params, COMMIT_LIST_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/commits"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/commits/{ref}`
    ///
    /// `reference` may be a SHA, a branch name or a tag name.
    pub async fn get_commit(&self, owner: &str, repo: &str, reference: &str) -> Result<RepoCommit, ApiError> {
        let path = repo_path(owner, repo, &format!("/commits/{}", segment(reference)));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/compare/{base}...{head}`
    pub async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        params: Option<&QueryParams>,
    ) -> Result<Comparison, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = repo_path(
            owner,
            repo,
            &format!("/compare/{}...{}", segment(base), segment(head)),
        );
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /repos/{owner}/{repo}/commits/{ref}/status`
    pub async fn get_combined_status(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> Result<CombinedStatus, ApiError> {
        let path = repo_path(owner, repo, &format!("/commits/{}/status", segment(reference)));
        self.get(&self.endpoint_url(&path, "")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_summary_and_short_sha() {
        let commit: RepoCommit = serde_json::from_value(json!({
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "commit": {"message": "Fix all the bugs\n\nLonger description"}
        }))
        .unwrap();

        assert_eq!(commit.summary(), "Fix all the bugs");
        assert_eq!(commit.short_sha(), "6dcb09b");
    }

    #[tokio::test]
    async fn test_list_commits_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/commits")
            .match_query(Matcher::Exact("sha=main&path=src%2Flib.rs".to_string()))
            .with_status(200)
            .with_body(r#"[{"sha": "abc", "commit": {"message": "init"}}]"#)
            .create_async()
            .await;

        let params = QueryParams::new().set("path", "src/lib.rs").set("sha", "main");
        let commits = client(&server.url())
            .list_commits("octo", "hello", Some(&params))
            .await
            .unwrap();

        assert_eq!(commits[0].summary(), "init");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_compare_commits_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/compare/v1.0.0...main")
            .with_status(200)
            .with_body(r#"{"status": "ahead", "ahead_by": 3, "behind_by": 0, "total_commits": 3}"#)
            .create_async()
            .await;

        let comparison = client(&server.url())
            .compare_commits("octo", "hello", "v1.0.0", "main", None)
            .await
            .unwrap();

        assert_eq!(comparison.ahead_by, 3);
        assert!(comparison.commits.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_combined_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello/commits/main/status")
            .with_status(200)
            .with_body(
                r#"{"state": "pending", "sha": "abc", "total_count": 1,
                    "statuses": [{"state": "pending", "context": "ci/build"}]}"#,
            )
            .create_async()
            .await;

        let status = client(&server.url())
            .get_combined_status("octo", "hello", "main")
            .await
            .unwrap();
        assert_eq!(status.state, "pending");
        assert_eq!(status.statuses[0].context.as_deref(), Some("ci/build"));
    }
}
