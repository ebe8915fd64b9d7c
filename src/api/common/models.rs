//
//  github-rest
//  api/common/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource shapes shared by several endpoint modules.
//!
//! Only the fields the library and CLI read are modelled; unknown fields in
//! the provider's JSON are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Lightweight user reference embedded in most GitHub resources.
///
/// # Example
///
/// ```rust
/// use github_rest::api::common::SimpleUser;
///
/// let json = r#"{"login": "octocat", "id": 1, "type": "User", "site_admin": false}"#;
/// let user: SimpleUser = serde_json::from_str(json).unwrap();
/// assert_eq!(user.login, "octocat");
/// assert_eq!(user.kind.as_deref(), Some("User"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleUser {
    /// The user's handle.
    pub login: String,

    /// Numeric account id.
    pub id: u64,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    /// Account type: `User`, `Organization` or `Bot`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub site_admin: bool,
}

/// An issue or pull request label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub id: Option<u64>,

    pub name: String,

    /// Hex color without the leading `#`.
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub default: bool,
}

/// A repository milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,

    pub title: String,

    /// `open` or `closed`.
    pub state: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub open_issues: u64,

    #[serde(default)]
    pub closed_issues: u64,

    #[serde(default)]
    pub due_on: Option<String>,
}
