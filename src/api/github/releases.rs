//
//  github-rest
//  api/github/releases.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Release endpoints and types.
//!
//! # Notes
//!
//! - Draft releases are only visible to users with push access
//! - [`GitHubClient::get_latest_release`] skips drafts and prereleases
//! - Asset uploads go through `uploads.github.com` and are not covered here

use serde::{Deserialize, Serialize};

use super::{repo_path, segment, PAGINATION_PARAMS};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub content_type: Option<String>,

    /// Size in bytes.
    pub size: u64,

    #[serde(default)]
    pub download_count: u64,

    pub browser_download_url: String,
}

/// A published or draft release.
///
/// # Example
///
/// ```rust
/// use github_rest::api::github::Release;
///
/// let json = r#"{
///     "id": 1,
///     "tag_name": "v1.0.0",
///     "name": "v1.0.0",
///     "draft": false,
///     "prerelease": false,
///     "html_url": "https://github.com/octocat/Hello-World/releases/v1.0.0"
/// }"#;
/// let release: Release = serde_json::from_str(json).unwrap();
/// assert_eq!(release.display_name(), "v1.0.0");
/// assert!(release.assets.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,

    pub tag_name: String,

    #[serde(default)]
    pub target_commitish: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub prerelease: bool,

    #[serde(default)]
    pub author: Option<SimpleUser>,

    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    pub html_url: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    /// The release name, falling back to the tag.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.tag_name)
    }
}

/// Body of `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateReleaseRequest {
    pub tag_name: String,

    /// Branch or SHA the tag is created from when it does not exist yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_release_notes: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReleaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/releases`
    pub async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Release>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/releases"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/releases/{release_id}`
    pub async fn get_release(&self, owner: &str, repo: &str, release_id: u64) -> Result<Release, ApiError> {
        let path = repo_path(owner, repo, &format!("/releases/{}", release_id));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/releases/latest`
    pub async fn get_latest_release(&self, owner: &str, repo: &str) -> Result<Release, ApiError> {
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/releases/latest"), ""))
            .await
    }

    /// `GET /repos/{owner}/{repo}/releases/tags/{tag}`
    pub async fn get_release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Release, ApiError> {
        let path = repo_path(owner, repo, &format!("/releases/tags/{}", segment(tag)));
        self.get(&self.endpoint_url(&path, "")).await
    }

    /// `POST /repos/{owner}/{repo}/releases`
    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateReleaseRequest,
    ) -> Result<Release, ApiError> {
        self.post(&self.endpoint_url(&repo_path(owner, repo, "/releases"), ""), request)
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/releases/{release_id}`
    pub async fn update_release(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        request: &UpdateReleaseRequest,
    ) -> Result<Release, ApiError> {
        let path = repo_path(owner, repo, &format!("/releases/{}", release_id));
        self.patch(&self.endpoint_url(&path, ""), request).await
    }

    /// `DELETE /repos/{owner}/{repo}/releases/{release_id}`
    ///
    /// The git tag is left in place.
    pub async fn delete_release(&self, owner: &str, repo: &str, release_id: u64) -> Result<(), ApiError> {
        let path = repo_path(owner, repo, &format!("/releases/{}", release_id));
        self.delete(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/releases/{release_id}/assets`
    pub async fn list_release_assets(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        params: Option<&QueryParams>,
    ) -> Result<Vec<ReleaseAsset>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = repo_path(owner, repo, &format!("/releases/{}/assets", release_id));
        self.get(&self.endpoint_url(&path, &query)).await
    }
}
