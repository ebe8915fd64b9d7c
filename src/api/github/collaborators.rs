//
//  github-rest
//  api/github/collaborators.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository collaborator endpoints.
//!
//! # Permission Levels
//!
//! * `pull` - Read
//! * `triage` - Manage issues and pull requests without write access
//! * `push` - Write
//! * `maintain` - Manage the repository without destructive actions
//! * `admin` - Full control

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{found, repo_path, segment};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /repos/{owner}/{repo}/collaborators`.
pub const COLLABORATOR_PARAMS: &[&str] = &["affiliation", "permission", "per_page", "page"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub maintain: bool,
    #[serde(default)]
    pub triage: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub pull: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub login: String,

    pub id: u64,

    #[serde(default)]
    pub permissions: Option<Permissions>,

    #[serde(default)]
    pub role_name: Option<String>,
}

/// Pending invitation created by [`GitHubClient::add_collaborator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInvitation {
    pub id: u64,

    #[serde(default)]
    pub invitee: Option<SimpleUser>,

    #[serde(default)]
    pub permissions: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,
}

/// A user's effective permission on a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// `admin`, `write`, `read` or `none`.
    pub permission: String,

    #[serde(default)]
    pub role_name: Option<String>,

    #[serde(default)]
    pub user: Option<SimpleUser>,
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/collaborators`
    pub async fn list_collaborators(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Collaborator>, ApiError> {
        let query = assemble_query_params(params, COLLABORATOR_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/collaborators"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/collaborators/{username}`
    ///
    /// `404` means "not a collaborator" and yields `Ok(false)`.
    pub async fn is_collaborator(&self, owner: &str, repo: &str, username: &str) -> Result<bool, ApiError> {
        let path = repo_path(owner, repo, &format!("/collaborators/{}", segment(username)));
        found(self.get(&self.endpoint_url(&path, "")).await)
    }

    /// `PUT /repos/{owner}/{repo}/collaborators/{username}`
    ///
    /// Returns the invitation when one was created, `None` when the user
    /// already had access and only the permission changed.
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        permission: Option<&str>,
    ) -> Result<Option<RepositoryInvitation>, ApiError> {
        let path = repo_path(owner, repo, &format!("/collaborators/{}", segment(username)));
        let body = permission.map(|permission| json!({ "permission": permission }));
        self.put(&self.endpoint_url(&path, ""), body.as_ref()).await
    }

    /// `DELETE /repos/{owner}/{repo}/collaborators/{username}`
    pub async fn remove_collaborator(&self, owner: &str, repo: &str, username: &str) -> Result<(), ApiError> {
        let path = repo_path(owner, repo, &format!("/collaborators/{}", segment(username)));
        self.delete(&self.endpoint_url(&path, "")).await
    }

    /// `GET /repos/{owner}/{repo}/collaborators/{username}/permission`
    pub async fn get_collaborator_permission(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
    ) -> Result<PermissionLevel, ApiError> {
        let path = repo_path(
            owner,
            repo,
            &format!("/collaborators/{}/permission", segment(username)),
        );
        self.get(&self.endpoint_url(&path, "")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_is_collaborator() {
        let mut server = Server::new_async().await;
        let _yes = server
            .mock("GET", "/repos/octo/hello/collaborators/alice")
            .with_status(204)
            .create_async()
            .await;
        let _no = server
            .mock("GET", "/repos/octo/hello/collaborators/mallory")
            .with_status(404)
            .create_async()
            .await;

        let client = client(&server.url());
        assert!(client.is_collaborator("octo", "hello", "alice").await.unwrap());
        assert!(!client.is_collaborator("octo", "hello", "mallory").await.unwrap());
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_add_collaborator_invitation_and_update() {
        let mut server = Server::new_async().await;
        let _invite = server
            .mock("PUT", "/repos/octo/hello/collaborators/bob")
            .match_body(Matcher::Json(json!({"permission": "triage"})))
            .with_status(201)
            .with_body(r#"{"id": 77, "permissions": "triage"}"#)
            .create_async()
            .await;
        let _existing = server
            .mock("PUT", "/repos/octo/hello/collaborators/carol")
            .with_status(204)
            .create_async()
            .await;

        let client = client(&server.url());
        let invitation = client
            .add_collaborator("octo", "hello", "bob", Some("triage"))
            .await
            .unwrap();
        assert_eq!(invitation.map(|i| i.id), Some(77));

        let none = client
            .add_collaborator("octo", "hello", "carol", None)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_collaborator_permission() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello/collaborators/alice/permission")
            .with_status(200)
            .with_body(r#"{"permission": "write", "role_name": "write", "user": {"login": "alice", "id": 1}}"#)
            .create_async()
            .await;

        let level = client(&server.url())
            .get_collaborator_permission("octo", "hello", "alice")
            .await
            .unwrap();
        assert_eq!(level.permission, "write");
    }
}
