//
//  github-rest
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitHub REST Client Library
//!
//! A typed client for the GitHub REST API (v3) that works against github.com
//! and GitHub Enterprise Server, plus the `ghr` command-line tool built on it.
//!
//! ## Overview
//!
//! Two pieces do all the work:
//!
//! - The **query assembler** ([`api::query::assemble_query_params`]) turns a
//!   loosely filled parameter bag and an endpoint's whitelist into a query
//!   string.
//! - The **request dispatcher** ([`api::GitHubClient`]) performs one HTTP
//!   round trip per call, injects the token and normalizes errors into
//!   [`api::ApiError`].
//!
//! Every endpoint method in [`api::github`] is a thin caller of the two.
//!
//! ## Module Structure
//!
//! - [`api`]: Dispatcher, query assembly, errors and endpoint modules
//! - [`auth`]: Token resolution, verification and keyring storage
//! - [`config`]: Configuration file, environment overrides, host handling
//! - [`context`]: Repository detection from flags, config and git remotes
//! - [`cli`]: `clap` command definitions for `ghr`
//! - [`output`]: Table and JSON rendering
//! - [`interactive`]: Prompts and selectors
//! - [`util`]: Formatting helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use github_rest::api::query::QueryParams;
//! use github_rest::{Config, GitHubClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = Config::load()?;
//! config.apply_process_env()?;
//!
//! let client = GitHubClient::new(config)?;
//! let params = QueryParams::new().set("state", "open").set("per_page", 5);
//! for pull in client.list_pulls("rust-lang", "rust", Some(&params)).await? {
//!     println!("#{} {}", pull.number, pull.title);
//! }
//! println!("{} request(s) sent", client.request_count());
//! # Ok(())
//! # }
//! ```

/// Typed GitHub REST API client.
///
/// The dispatcher, the query assembler, the error taxonomy and one module
/// per resource family.
pub mod api;

/// Token handling.
///
/// Resolves the active token from flag, environment, configuration file or
/// system keyring, and verifies it against `GET /user`.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/ghr/config.toml`
/// - macOS: `~/Library/Application Support/ghr/config.toml`
/// - Windows: `%APPDATA%\ghr\config\config.toml`
pub mod config;

/// Repository context detection.
pub mod context;

/// Interactive terminal prompts.
pub mod interactive;

/// Output formatting: tables for people, JSON for scripts.
pub mod output;

/// Formatting helpers for times, sizes and strings.
pub mod util;

pub use api::GitHubClient;
pub use cli::Cli;
pub use config::Config;
pub use context::RepoContext;

/// Application name, used for the binary, the config directory and the
/// keyring service.
pub const APP_NAME: &str = "ghr";

/// The crate version from Cargo.toml.
///
/// ```rust
/// use github_rest::VERSION;
///
/// assert!(!VERSION.is_empty());
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// The token is missing, invalid or lacks the required scopes (401).
    pub const AUTH_ERROR: i32 = 4;

    /// The resource does not exist or is not visible to the token (404).
    pub const NOT_FOUND: i32 = 8;

    /// The rate limit is exhausted. Wait for the reset before retrying.
    pub const RATE_LIMIT: i32 = 32;
}
