//
//  github-rest
//  api/github/contents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository contents endpoints.
//!
//! File bodies travel base64-encoded in both directions. GitHub wraps the
//! encoded text at 60 columns; [`decode_content`] tolerates that.
//!
//! # Example
//!
//! ```rust,no_run
//! use github_rest::api::github::Contents;
//! use github_rest::api::GitHubClient;
//!
//! # async fn example(client: &GitHubClient) -> Result<(), Box<dyn std::error::Error>> {
//! match client.get_contents("octo", "hello", "Cargo.toml", None).await? {
//!     Contents::File(file) => println!("{}", String::from_utf8_lossy(&file.decode()?)),
//!     Contents::Directory(entries) => {
//!         for entry in entries {
//!             println!("{}\t{}", entry.kind, entry.path);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{repo_path, segment};
use crate::api::common::ApiError;
use crate::api::query::{assemble_query_params, QueryParams};
use crate::api::GitHubClient;

/// Query parameters accepted by the contents and readme endpoints.
pub const CONTENT_PARAMS: &[&str] = &["ref"];

/// A file, directory, symlink or submodule entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// `file`, `dir`, `symlink` or `submodule`.
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,

    pub path: String,

    /// Blob SHA, required when updating the file.
    pub sha: String,

    #[serde(default)]
    pub size: u64,

    /// `base64` for files, absent for listings.
    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub download_url: Option<String>,
}

impl Content {
    /// Decodes the embedded file body.
    ///
    /// Entries fetched through a directory listing carry no body and decode
    /// to an empty buffer.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self.content.as_deref() {
            Some(encoded) => decode_content(encoded),
            None => Ok(Vec::new()),
        }
    }
}

/// Either a single entry or a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<Content>),
    File(Box<Content>),
}

/// A file to write with [`GitHubClient::create_or_update_file`].
#[derive(Debug, Clone)]
pub struct FileWrite<'a> {
    /// Commit message.
    pub message: &'a str,

    /// Raw file bytes; encoded before sending.
    pub content: &'a [u8],

    /// Blob SHA of the file being replaced. `None` creates a new file.
    pub sha: Option<&'a str>,

    /// Target branch; the default branch when `None`.
    pub branch: Option<&'a str>,
}

#[derive(Serialize)]
struct FileWriteBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

/// Commit created by a contents write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCommit {
    pub sha: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWriteResult {
    #[serde(default)]
    pub content: Option<Content>,
    pub commit: FileCommit,
}

/// Decodes base64 file content as returned by GitHub, line breaks included.
///
/// ```rust
/// use github_rest::api::github::decode_content;
///
/// assert_eq!(decode_content("aGVs\nbG8=\n").unwrap(), b"hello");
/// ```
pub fn decode_content(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64.decode(compact)
}

/// Encodes a path for the contents API, keeping `/` separators.
fn content_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(segment)
        .collect::<Vec<_>>()
        .join("/")
}

impl GitHubClient {
    /// `GET /repos/{owner}/{repo}/contents/{path}`
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Contents, ApiError> {
        let query = assemble_query_params(params, CONTENT_PARAMS);
        let path = repo_path(owner, repo, &format!("/contents/{}", content_path(path)));
        self.get(&self.endpoint_url(&path, &query)).await
    }

    /// `GET /repos/{owner}/{repo}/readme`
    pub async fn get_readme(
        &self,
        owner: &str,
        repo: &str,
        params: Option<&QueryParams>,
    ) -> Result<Content, ApiError> {
        let query = assemble_query_params(params, CONTENT_PARAMS);
        self.get(&self.endpoint_url(&repo_path(owner, repo, "/readme"), &query))
            .await
    }

    /// `PUT /repos/{owner}/{repo}/contents/{path}`
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        file: &FileWrite<'_>,
    ) -> Result<FileWriteResult, ApiError> {
        let body = FileWriteBody {
            message: file.message,
            content: BASE64.encode(file.content),
            sha: file.sha,
            branch: file.branch,
        };
        let path = repo_path(owner, repo, &format!("/contents/{}", content_path(path)));
        self.put(&self.endpoint_url(&path, ""), Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::github::test_support::client;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_content_path_keeps_separators() {
        assert_eq!(content_path("/docs/getting started.md"), "docs/getting%20started.md");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_content("!!!").is_err());
    }

    #[tokio::test]
    async fn test_get_file_contents() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/contents/src/main.rs")
            .match_query(Matcher::Exact("ref=dev".to_string()))
            .with_status(200)
            .with_body(
                json!({
                    "type": "file",
                    "name": "main.rs",
                    "path": "src/main.rs",
                    "sha": "abc",
                    "size": 12,
                    "encoding": "base64",
                    "content": "Zm4gbWFpbigp\nIHt9\n"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let params = QueryParams::new().set("ref", "dev");
        let contents = client(&server.url())
            .get_contents("octo", "hello", "src/main.rs", Some(&params))
            .await
            .unwrap();

        match contents {
            Contents::File(file) => assert_eq!(file.decode().unwrap(), b"fn main() {}"),
            Contents::Directory(_) => panic!("expected a file"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_directory_listing() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello/contents/src")
            .with_status(200)
            .with_body(
                r#"[{"type": "file", "name": "lib.rs", "path": "src/lib.rs", "sha": "1"},
                    {"type": "dir", "name": "api", "path": "src/api", "sha": "2"}]"#,
            )
            .create_async()
            .await;

        let contents = client(&server.url())
            .get_contents("octo", "hello", "src", None)
            .await
            .unwrap();

        match contents {
            Contents::Directory(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1].kind, "dir");
            }
            Contents::File(_) => panic!("expected a directory"),
        }
    }

    #[tokio::test]
    async fn test_create_file_encodes_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/octo/hello/contents/notes.txt")
            .match_body(Matcher::Json(json!({
                "message": "Add notes",
                "content": "aGVsbG8=",
                "branch": "main"
            })))
            .with_status(201)
            .with_body(r#"{"content": null, "commit": {"sha": "c0ffee"}}"#)
            .create_async()
            .await;

        let file = FileWrite {
            message: "Add notes",
            content: b"hello",
            sha: None,
            branch: Some("main"),
        };
        let result = client(&server.url())
            .create_or_update_file("octo", "hello", "notes.txt", &file)
            .await
            .unwrap();

        assert_eq!(result.commit.sha, "c0ffee");
        mock.assert_async().await;
    }
}
