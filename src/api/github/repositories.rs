//
//  github-rest
//  api/github/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository endpoints and types.
//!
//! Covers repository lookup, listing for the authenticated user, a user or an
//! organization, creation, update and deletion, plus the small read-only
//! sub-resources (branches, tags, languages, contributors).
//!
//! # Example
//!
//! ```rust,no_run
//! use github_rest::api::github::CreateRepoRequest;
//! use github_rest::api::GitHubClient;
//!
//! # async fn example(client: &GitHubClient) -> Result<(), github_rest::api::ApiError> {
//! let request = CreateRepoRequest {
//!     name: "scratch".to_string(),
//!     description: Some("Throwaway experiments".to_string()),
//!     private: Some(true),
//!     auto_init: Some(true),
//!     ..Default::default()
//! };
//! let repo = client.create_repo(&request).await?;
//! println!("created {}", repo.full_name);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{repo_path, segment, PAGINATION_PARAMS};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /user/repos`.
pub const USER_REPO_PARAMS: &[&str] = &[
    "visibility",
    "affiliation",
    "type",
    "sort",
    "direction",
    "per_page",
    "page",
    "since",
    "before",
];

/// Query parameters accepted by `GET /users/{username}/repos` and
/// `GET /orgs/{org}/repos`.
pub const OWNER_REPO_PARAMS: &[&str] = &["type", "sort", "direction", "per_page", "page"];

pub const BRANCH_PARAMS: &[&str] = &["protected", "per_page", "page"];

pub const CONTRIBUTOR_PARAMS: &[&str] = &["anon", "per_page", "page"];

/// A GitHub repository.
///
/// # Example
///
/// ```rust
/// use github_rest::api::github::Repository;
///
/// let json = r#"{
///     "id": 1296269,
///     "name": "Hello-World",
///     "full_name": "octocat/Hello-World",
///     "owner": {"login": "octocat", "id": 1},
///     "private": false,
///     "html_url": "https://github.com/octocat/Hello-World",
///     "default_branch": "main"
/// }"#;
/// let repo: Repository = serde_json::from_str(json).unwrap();
/// assert_eq!(repo.owner.login, "octocat");
/// assert_eq!(repo.stargazers_count, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,

    pub name: String,

    /// `owner/name`.
    pub full_name: String,

    pub owner: SimpleUser,

    #[serde(default)]
    pub private: bool,

    pub html_url: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub archived: bool,

    /// `public`, `private` or `internal`.
    #[serde(default)]
    pub visibility: Option<String>,

    #[serde(default)]
    pub default_branch: Option<String>,

    /// Primary language as detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub open_issues_count: u64,

    #[serde(default)]
    pub clone_url: Option<String>,

    #[serde(default)]
    pub ssh_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub pushed_at: Option<String>,
}

/// Body of `POST /user/repos` and `POST /orgs/{org}/repos`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    /// Create an initial commit with an empty README.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
}

/// Body of `PATCH /repos/{owner}/{repo}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// The commit a branch or tag points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,

    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub tarball_url: Option<String>,
}

/// A contributor and their commit count.
///
/// Anonymous contributors (with `anon=true`) have no `login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    pub contributions: u64,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}`
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository, ApiError> {
        self.get(&self.endpoint_url(&repo_path(owner, repo, ""), ""))
            .await
    }

    /// Fetches the repository named by `config.owner` and `config.repo`.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingRepository`] when either is unset; nothing is sent.
    pub async fn get_default_repo(&self) -> Result<Repository, ApiError> {
        let (owner, repo) = self.default_repository()?;
        self.get_repo(owner, repo).await
    }

    /// `GET /user/repos`, repositories of the authenticated user.
    pub async fn list_user_repos(
        &self,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Repository>, ApiError> {
        let query = assemble_query_params(params, USER_REPO_PARAMS);
        self.get(&self.endpoint_url("/user/repos", &query)).await
    }

    /// `GET /users/{username}/repos`
    pub async fn list_owner_repos(
        &self,
        username: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Repository>, ApiError> {
        let query = assemble_query_params(params, OWNER_REPO_PARAMS);
        let path = format!("/users/{}/repos", segment(username));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /orgs/{org}/repos`
    pub async fn list_org_repos(
        &self,
        org: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Repository>, ApiError> {
        let query = assemble_query_params(params, OWNER_REPO_PARAMS);
        let path = format!("/orgs/{}/repos", segment(org));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `POST /user/repos`
    pub async fn create_repo(&self, request: &CreateRepoRequest) -> Result<Repository, ApiError> {
        self.post(&self.endpoint_url("/user/repos", ""), request)
            .await
    }

    /// `POST /orgs/{org}/repos`
    pub async fn create_org_repo(
        &self,
        org: &str,
        request: &CreateRepoRequest,
    ) -> Result<Repository, ApiError> {
        let path = format!("/orgs/{}/repos", segment(org));
        self.post(&self.endpoint_url(&path, ""), request).await
    }

    /// `PATCH /repos/{owner}/{repo}`
    pub async fn update_repo(
        &self,
        owner: &str,
        repo: &str,
        request: &UpdateRepoRequest,
    ) -> Result<Repository, ApiError> {
        self.patch(&self.endpoint_url(&repo_path(owner, repo, ""), ""), request)
            .await
    }

    /// `DELETE /repos/{owner}/{repo}`. Requires the `delete_repo` scope.
    pub async fn delete_repo(&self, owner: &str, repo: &str) -> Result<(), ApiError> {
        self.delete(&self.endpoint_url(&repo_path(owner, repo, ""), ""))
            .await
    }

    /// `GET /repos/{owner}/{repo}/branches`
    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Branch>, ApiError> {
        let query = assemble_query_params(params, BRANCH_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/branches"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/branches/{branch}`
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch, ApiError> {
        let path = repo_path(owner, repo, &format!("/branches/{}", segment(branch)));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/tags`
    pub async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Tag>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/tags"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/languages`, bytes of code per language.
    pub async fn list_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>, ApiError> {
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/languages"), ""))
            .await
    }

    /// `GET /repos/{owner}/{repo}/contributors`
    pub async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Contributor>, ApiError> {
        let query = assemble_query_params(params, CONTRIBUTOR_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/contributors"), &query))
            .await
    }
}
