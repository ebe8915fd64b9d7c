//
//  github-rest
//  api/github/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization team endpoints.
//!
//! Teams are addressed by slug under their organization. Legacy id-based
//! routes are not used.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{segment, Repository, PAGINATION_PARAMS};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by `GET /orgs/{org}/teams/{slug}/members`.
pub const TEAM_MEMBER_PARAMS: &[&str] = &["role", "per_page", "page"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,

    pub name: String,

    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    /// `secret` or `closed`.
    #[serde(default)]
    pub privacy: Option<String>,

    /// Default permission on team repositories.
    #[serde(default)]
    pub permission: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub members_count: Option<u64>,

    #[serde(default)]
    pub repos_count: Option<u64>,
}

/// A user's membership in a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMembership {
    /// `member` or `maintainer`.
    pub role: String,

    /// `active` or `pending`.
    pub state: String,

    #[serde(default)]
    pub url: Option<String>,
}

fn team_path(org: &str, slug: &str, suffix: &str) -> String {
    format!("/orgs/{}/teams/{}{}", segment(org), segment(slug), suffix)
}

impl GitHubClient {
    /// `GET /orgs/{org}/teams`
    pub async fn list_org_teams(&self, org: &str, params: Option<&QueryParams>) -> Result<Vec<Team>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = format!("/orgs/{}/teams", segment(org));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /orgs/{org}/teams/{team_slug}`
    pub async fn get_team_by_slug(&self, org: &str, slug: &str) -> Result<Team, ApiError> {
        self.get(&self.endpoint_url(&team_path(org, slug, ""), ""))
            .await
    }

    /// `GET /orgs/{org}/teams/{team_slug}/members`
    pub async fn list_team_members(
        &self,
        org: &str,
        slug: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<SimpleUser>, ApiError> {
        let query = assemble_query_params(params, TEAM_MEMBER_PARAMS);
        self.get(&self.endpoint_url(&team_path(org, slug, "/members"), &query))
            .await
    }

    /// `GET /orgs/{org}/teams/{team_slug}/repos`
    pub async fn list_team_repos(
        &self,
        org: &str,
        slug: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Repository>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&team_path(org, slug, "/repos"), &query))
            .await
    }

    /// `PUT /orgs/{org}/teams/{team_slug}/repos/{owner}/{repo}`
    ///
    /// `permission` is `pull`, `triage`, `push`, `maintain`, `admin` or a
    /// custom role name; `None` keeps the team's default.
    pub async fn add_or_update_team_repo(
        &self,
        org: &str,
        slug: &str,
        owner: &str,
        repo: &str,
        permission: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = team_path(org, slug, &format!("/repos/{}/{}", segment(owner), segment(repo)));
        let body = permission.map(|permission| json!({ "permission": permission }));
        self.put(&self.endpoint_url(&path, ""), body.as_ref()).await
    }

    /// `DELETE /orgs/{org}/teams/{team_slug}/repos/{owner}/{repo}`
    pub async fn remove_team_repo(&self, org: &str, slug: &str, owner: &str, repo: &str) -> Result<(), ApiError> {
        let path = team_path(org, slug, &format!("/repos/{}/{}", segment(owner), segment(repo)));
        self.delete(&self.endpoint_url(&path, "")).await
    }

    /// `GET /orgs/{org}/teams/{team_slug}/memberships/{username}`
    pub async fn get_team_membership(
        &self,
        org: &str,
        slug: &str,
        username: &str,
    ) -> Result<TeamMembership, ApiError> {
        let path = team_path(org, slug, &format!("/memberships/{}", segment(username)));
        self.get(&self.endpoint_url(&path, "")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_list_team_members_with_role() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/acme/teams/platform/members")
            .match_query(Matcher::Exact("role=maintainer".to_string()))
            .with_status(200)
            .with_body(r#"[{"login": "alice", "id": 1}]"#)
            .create_async()
            .await;

        let params = QueryParams::new().set("role", "maintainer");
        let members = client(&server.url())
            .list_team_members("acme", "platform", Some(&params))
            .await
            .unwrap();

        assert_eq!(members[0].login, "alice");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_team_repo_with_permission() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/orgs/acme/teams/platform/repos/acme/deploy")
            .match_body(Matcher::Json(json!({"permission": "push"})))
            .with_status(204)
            .create_async()
            .await;

        client(&server.url())
            .add_or_update_team_repo("acme", "platform", "acme", "deploy", Some("push"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_team_membership() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/orgs/acme/teams/platform/memberships/bob")
            .with_status(200)
            .with_body(r#"{"role": "member", "state": "pending"}"#)
            .create_async()
            .await;

        let membership = client(&server.url())
            .get_team_membership("acme", "platform", "bob")
            .await
            .unwrap();
        assert_eq!(membership.state, "pending");
    }
}
