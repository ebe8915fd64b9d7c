//
//  github-rest
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! GitHub authenticates REST calls with a single token sent as
//! `Authorization: token <value>`. This module decides which token to use and
//! where to keep it; the dispatcher only ever sees the final value in
//! [`Config::token`](crate::config::Config::token).
//!
//! ## Token Sources
//!
//! Checked in order, first hit wins:
//!
//! 1. `--token` flag
//! 2. `GH_TOKEN`, then `GITHUB_TOKEN`
//! 3. `token` in the configuration file
//! 4. The system keyring entry for the host (written by `ghr auth login`)
//!
//! ## Module Structure
//!
//! - [`keyring`]: Keyring storage keyed by web host
//! - [`token`]: Token input, shape checks and verification against `/user`
//!
//! ## Example
//!
//! ```rust
//! use github_rest::auth::{resolve_token, TokenSource};
//!
//! let resolved = resolve_token(
//!     None,
//!     |name| (name == "GITHUB_TOKEN").then(|| "ghp_from_env".to_string()),
//!     Some("ghp_from_file"),
//!     || None,
//! )
//! .unwrap();
//!
//! assert_eq!(resolved.token, "ghp_from_env");
//! assert_eq!(resolved.source, TokenSource::Environment("GITHUB_TOKEN"));
//! ```

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;

use std::fmt;

use crate::config::ENV_TOKENS;

/// Where the active token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    /// Name of the environment variable.
    Environment(&'static str),
    ConfigFile,
    Keyring,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "--token flag"),
            Self::Environment(var) => write!(f, "{} environment variable", var),
            Self::ConfigFile => write!(f, "configuration file"),
            Self::Keyring => write!(f, "system keyring"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    pub token: String,
    pub source: TokenSource,
}

/// Picks the token to authenticate with.
///
/// Blank values are skipped at every level. `keyring` is only invoked when
/// no earlier source produced a token, so the keyring is not touched when a
/// token was given explicitly.
pub fn resolve_token<E, K>(
    flag: Option<&str>,
    env: E,
    config: Option<&str>,
    keyring: K,
) -> Option<ResolvedToken>
where
    E: Fn(&str) -> Option<String>,
    K: FnOnce() -> Option<String>,
{
    let usable = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    if let Some(token) = flag.and_then(usable) {
        return Some(ResolvedToken {
            token,
            source: TokenSource::Flag,
        });
    }

    for var in ENV_TOKENS {
        if let Some(token) = env(var).as_deref().and_then(usable) {
            return Some(ResolvedToken {
                token,
                source: TokenSource::Environment(var),
            });
        }
    }

    if let Some(token) = config.and_then(usable) {
        return Some(ResolvedToken {
            token,
            source: TokenSource::ConfigFile,
        });
    }

    keyring()
        .as_deref()
        .and_then(usable)
        .map(|token| ResolvedToken {
            token,
            source: TokenSource::Keyring,
        })
}
