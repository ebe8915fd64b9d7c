//
//  github-rest
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # CLI Module
//!
//! Command-line interface for `ghr`, built with `clap` derive macros. Every
//! command is a thin layer over the typed client in [`crate::api`].
//!
//! ## Command Structure
//!
//! ```text
//! ghr
//! ├── api         Raw access to the request dispatcher
//! ├── auth        login, logout, status, token
//! ├── config      get, set, unset, list, path
//! ├── repo        view, list
//! ├── issue       list, view, create, comment, close, reopen
//! ├── pr          list, view, merge, diff-stat
//! ├── release     list, view, latest
//! ├── rate-limit  Current rate-limit budget
//! ├── completion  Shell completion scripts
//! └── version
//! ```
//!
//! ## Global Options
//!
//! | Option | Short | Description |
//! |--------|-------|-------------|
//! | `--repo` | `-R` | Repository as `OWNER/REPO` or `HOST/OWNER/REPO` |
//! | `--host` | | API host or GitHub Enterprise hostname |
//! | `--token` | | Token, ahead of environment, configuration and keyring |
//! | `--json` | | Print JSON instead of tables |
//! | `--debug` | | Log every request |
//! | `--no-prompt` | | Never prompt; fail on missing input instead |

mod api;
mod auth;
mod completion;
mod config;
mod issue;
mod pr;
mod rate_limit;
mod release;
mod repo;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use issue::IssueCommand;
pub use pr::PrCommand;
pub use rate_limit::RateLimitCommand;
pub use release::ReleaseCommand;
pub use repo::RepoCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::GitHubClient;
use crate::auth::{resolve_token, KeyringStore, TokenSource};
use crate::config::Config;
use crate::context::{ContextResolver, RepoContext};
use crate::interactive;
use crate::output::OutputWriter;

/// Work with the GitHub REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "ghr",
    version,
    about = "Work with the GitHub REST API from the command line",
    long_about = "ghr is a small CLI over a typed GitHub REST client.\n\n\
                  It works against github.com and GitHub Enterprise Server.",
    propagate_version = true,
    after_help = "Use 'ghr <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Repository to work with (OWNER/REPO or HOST/OWNER/REPO)
    #[arg(long, short = 'R', global = true)]
    pub repo: Option<String>,

    /// API host (github.com, a GitHub Enterprise hostname or a full URL)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Token to authenticate with
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every request and its rate-limit headers
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "GHR_NO_PROMPT")]
    pub no_prompt: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make an authenticated API request
    Api(ApiCommand),

    /// Authenticate with GitHub
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Work with repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Work with issues
    Issue(IssueCommand),

    /// Work with pull requests
    Pr(PrCommand),

    /// Work with releases
    Release(ReleaseCommand),

    /// Show the current rate-limit budget
    #[command(name = "rate-limit")]
    RateLimit(RateLimitCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }

    pub fn can_prompt(&self) -> bool {
        interactive::can_prompt(self.no_prompt)
    }

    /// Builds the effective configuration and reports where its token came
    /// from.
    ///
    /// Layers file, environment and flags, then resolves the token as
    /// `--token` > `GH_TOKEN` > `GITHUB_TOKEN` > file > keyring.
    pub fn resolve_config(&self) -> Result<(Config, Option<TokenSource>)> {
        let mut config = Config::load()?;
        let file_token = config.token.take();

        config.apply_process_env()?;
        if let Some(host) = &self.host {
            config.set("host", host)?;
        }
        if self.debug {
            config.debug = true;
        }
        config.validate()?;

        let host = config.host.clone();
        let resolved = resolve_token(
            self.token.as_deref(),
            |name| std::env::var(name).ok(),
            file_token.as_deref(),
            || KeyringStore::new().lookup(&host),
        );

        let source = resolved.as_ref().map(|r| r.source);
        config.token = resolved.map(|r| r.token);
        if let Some(source) = source {
            tracing::debug!(%source, host = %config.host, "using token");
        }

        Ok((config, source))
    }

    pub fn config(&self) -> Result<Config> {
        Ok(self.resolve_config()?.0)
    }

    pub fn client(&self) -> Result<GitHubClient> {
        client_for(self.config()?)
    }

    /// The repository a command operates on.
    ///
    /// `explicit` is a positional `OWNER/REPO` argument that takes priority
    /// over `--repo`.
    pub fn repo_context(&self, config: &Config, explicit: Option<&str>) -> Result<RepoContext> {
        ContextResolver::new(config).resolve(explicit.or(self.repo.as_deref()))
    }

    /// A client plus the repository to use it on.
    pub fn repo_client(&self) -> Result<(GitHubClient, RepoContext)> {
        let config = self.config()?;
        let ctx = self.repo_context(&config, None)?;
        Ok((client_for(config)?, ctx))
    }

    /// Whether logging should include request-level detail.
    ///
    /// Reads the configuration file quietly; an unreadable file only
    /// disables the file's `debug` setting.
    pub fn debug_requested(&self) -> bool {
        if self.debug {
            return true;
        }
        let mut config = Config::load().unwrap_or_default();
        let _ = config.apply_process_env();
        config.debug
    }
}

fn client_for(config: Config) -> Result<GitHubClient> {
    GitHubClient::new(config).context("Failed to create API client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ghr", "issue", "list", "--json", "-R", "octo/hello", "--host", "ghe.corp.io",
        ])
        .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.repo.as_deref(), Some("octo/hello"));
        assert_eq!(cli.global.host.as_deref(), Some("ghe.corp.io"));
        assert!(matches!(cli.command, Commands::Issue(_)));
    }

    #[test]
    fn test_repo_context_prefers_explicit_argument() {
        let global = GlobalOptions {
            repo: Some("octo/flag".to_string()),
            ..GlobalOptions::default()
        };
        let config = Config::default();

        let ctx = global.repo_context(&config, Some("octo/positional")).unwrap();
        assert_eq!(ctx.full_name(), "octo/positional");

        let ctx = global.repo_context(&config, None).unwrap();
        assert_eq!(ctx.full_name(), "octo/flag");
    }
}
