//
//  github-rest
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Context
//!
//! Repository-scoped CLI commands need an owner and a repository name. This
//! module works them out from, in order:
//!
//! 1. The `--repo OWNER/REPO` flag
//! 2. `owner` and `repo` in the configuration
//! 3. The `origin` remote of the git repository in the working directory
//!
//! ## Usage
//!
//! ```rust
//! use github_rest::context::RepoContext;
//!
//! let ctx = RepoContext::parse("rust-lang/cargo", "github.com").unwrap();
//! assert_eq!(ctx.full_name(), "rust-lang/cargo");
//! assert_eq!(ctx.web_url(), "https://github.com/rust-lang/cargo");
//! ```

mod git;
mod resolver;

pub use git::*;
pub use resolver::*;

use anyhow::{bail, Result};

use crate::config::normalize_host;

/// A resolved repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Web host, `github.com` or a GitHub Enterprise hostname.
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepoContext {
    /// Parses `OWNER/REPO` or `HOST/OWNER/REPO`.
    ///
    /// `default_host` is used for the two-part form.
    pub fn parse(value: &str, default_host: &str) -> Result<Self> {
        let parts: Vec<&str> = value.trim().trim_end_matches('/').split('/').collect();
        let (host, owner, repo) = match parts.as_slice() {
            [owner, repo] => (normalize_host(default_host), *owner, *repo),
            [host, owner, repo] => (normalize_host(host), *owner, *repo),
            _ => bail!("Invalid repository '{}'. Expected OWNER/REPO", value),
        };

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if owner.is_empty() || repo.is_empty() {
            bail!("Invalid repository '{}'. Expected OWNER/REPO", value);
        }

        Ok(Self {
            host,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.repo)
    }
}
