//
//  github-rest
//  api/github/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Activity event streams.
//!
//! Event payloads differ per event type and are kept as raw JSON.
//! GitHub serves at most 300 events per stream and up to 90 days back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{repo_path, segment, PAGINATION_PARAMS};
use crate::api::common::{ApiError, SimpleUser};
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventActor {
    pub id: u64,

    pub login: String,

    #[serde(default)]
    pub display_login: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    pub id: u64,

    /// `owner/name`.
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of an activity stream.
///
/// ```rust
/// use github_rest::api::github::Event;
///
/// let json = r#"{
///     "id": "22249084947",
///     "type": "WatchEvent",
///     "actor": {"id": 1, "login": "octocat"},
///     "repo": {"id": 3, "name": "octocat/Hello-World"},
///     "payload": {"action": "started"},
///     "public": true,
///     "created_at": "2022-06-09T12:47:28Z"
/// }"#;
/// let event: Event = serde_json::from_str(json).unwrap();
/// assert_eq!(event.action(), Some("started"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event ids are strings in the API.
    pub id: String,

    /// `PushEvent`, `IssuesEvent`, `WatchEvent` and so on.
    #[serde(rename = "type")]
    pub kind: String,

    pub actor: EventActor,

    pub repo: EventRepo,

    #[serde(default)]
    pub payload: Value,

    #[serde(default)]
    pub public: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl Event {
    /// `payload.action`, for event types that carry one.
    pub fn action(&self) -> Option<&str> {
        self.payload.get("action").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRef {
    pub number: u64,
    pub title: String,
}

/// A timeline event on an issue (`closed`, `labeled`, `assigned` ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    pub id: u64,

    pub event: String,

    #[serde(default)]
    pub actor: Option<SimpleUser>,

    #[serde(default)]
    pub commit_id: Option<String>,

    #[serde(default)]
    pub issue: Option<IssueRef>,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl GitHubClient {
    /// `GET /events`
    pub async fn list_public_events(&self, params: Option<&QueryParams>) -> Result<Vec<Event>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url("/events", &query)).await
    }

    /// `GET /repos/{owner}/{repo}/events`
    pub async fn list_repo_events(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Event>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/events"), &query))
            .await
    }

    /// `GET /repos/{owner}/{repo}/issues/events`
    pub async fn list_repo_issue_events(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<IssueEvent>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/issues/events"), &query))
            .await
    }

    /// `GET /orgs/{org}/events`
    pub async fn list_org_events(&self, org: &str, params: Option<&QueryParams>) -> Result<Vec<Event>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = format!("/orgs/{}/events", segment(org));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /users/{username}/events`
    ///
    /// Includes private events when authenticated as `username`.
    pub async fn list_user_events(
        &self,
        username: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Event>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = format!("/users/{}/events", segment(username));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /users/{username}/received_events`
    pub async fn list_user_received_events(
        &self,
        username: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Event>, ApiError> {
        let query = assemble_query_params(params, PAGINATION_PARAMS);
        let path = format!("/users/{}/received_events", segment(username));
        self.get(&self.endpoint_url(&path, &query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_list_repo_events_paginates_by_caller() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/events")
            .match_query(Matcher::Exact("per_page=1&page=3".to_string()))
            .with_status(200)
            .with_body(
                r#"[{"id": "1", "type": "PushEvent", "actor": {"id": 1, "login": "octo"},
                     "repo": {"id": 2, "name": "octo/hello"}, "payload": {"size": 1}}]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let params = QueryParams::new().set("page", 3).set("per_page", 1);
        let client = client(&server.url());
        let events = client
            .list_repo_events("octo", "hello", Some(&params))
            .await
            .unwrap();

        assert_eq!(events[0].kind, "PushEvent");
        assert_eq!(events[0].action(), None);
        assert_eq!(client.request_count(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_issue_events() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello/issues/events")
            .with_status(200)
            .with_body(r#"[{"id": 5, "event": "closed", "issue": {"number": 4, "title": "Bug"}}]"#)
            .create_async()
            .await;

        let events = client(&server.url())
            .list_repo_issue_events("octo", "hello", None)
            .await
            .unwrap();
        assert_eq!(events[0].issue.as_ref().map(|i| i.number), Some(4));
    }
}
