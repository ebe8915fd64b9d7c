//
//  github-rest
//  context/git.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Git Repository Access
//!
//! A thin wrapper over `git2` for the two facts the CLI needs from the local
//! checkout: remote URLs and the current branch.
//!
//! ```rust,no_run
//! use github_rest::context::GitContext;
//!
//! if let Ok(git) = GitContext::open() {
//!     println!("on {}", git.current_branch().unwrap());
//!     if let Some(url) = git.origin_url().unwrap() {
//!         println!("origin is {}", url);
//!     }
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use git2::Repository;

pub struct GitContext {
    repo: Repository,
}

impl GitContext {
    /// Opens the repository containing the current directory, walking up
    /// parent directories as git does.
    pub fn open() -> Result<Self> {
        Self::discover(Path::new("."))
    }

    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self { repo })
    }

    /// Short name of `HEAD`, or `HEAD` when detached.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// URL of a named remote; `None` when the remote does not exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn origin_url(&self) -> Result<Option<String>> {
        self.remote_url("origin")
    }
}
