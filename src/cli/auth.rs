//
//  github-rest
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands
//!
//! Tokens are verified against `GET /user` before they are stored. They go
//! to the system keyring, keyed by web host, unless `--insecure-storage`
//! asks for the configuration file instead.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::api::GitHubClient;
use crate::auth::{
    mask_token, read_token_from_stdin, validate_token, verify_token, KeyringStore, TokenKind,
    TokenSource,
};
use crate::config::{web_host, Config};
use crate::interactive::prompt_password;
use crate::output::print_field;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a personal access token for a host
    Login(LoginArgs),

    /// Remove the stored token for a host
    Logout,

    /// Show the active token, its source and its scopes
    Status(StatusArgs),

    /// Print the active token
    Token,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,

    /// Save the token in the configuration file instead of the keyring
    #[arg(long)]
    pub insecure_storage: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Display the full token
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global).await,
            AuthSubcommand::Token => token(global),
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let output = global.output();
    let (mut config, _) = global.resolve_config()?;
    let host = web_host(&config.host);

    let token = if args.with_token {
        read_token_from_stdin()?
    } else if let Some(token) = &global.token {
        token.trim().to_string()
    } else if global.can_prompt() {
        output.write_info(&format!(
            "Create a token at https://{}/settings/tokens",
            host
        ));
        prompt_password("Paste your token")?
    } else {
        bail!("No token given. Use --with-token to read one from standard input.");
    };

    if !validate_token(&token) {
        bail!("That does not look like a token");
    }

    config.token = Some(token.clone());
    let client = GitHubClient::new(config.clone())?;
    let info = verify_token(&client)
        .await
        .with_context(|| format!("Token was rejected by {}", host))?;

    if args.insecure_storage {
        let path = Config::config_path()?;
        let mut file = Config::load_from(&path)?;
        file.token = Some(token);
        file.save_to(&path)?;
        output.write_warning(&format!("Token saved in plain text to {}", path.display()));
    } else {
        KeyringStore::new()
            .store(&config.host, &token)
            .context("Failed to store token in the system keyring")?;
    }

    output.write_success(&format!("Logged in to {} as {}", host, info.user.login));
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let output = global.output();
    let config = global.config()?;
    let host = web_host(&config.host);

    KeyringStore::new().delete(&config.host)?;

    if Config::load()?.token.is_some() {
        output.write_warning("A token is still set in the configuration file. Run 'ghr config unset token' to remove it.");
    }
    output.write_success(&format!("Logged out of {}", host));
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let output = global.output();
    let (config, source) = global.resolve_config()?;
    let host = web_host(&config.host);

    let (Some(token), Some(source)) = (config.token.clone(), source) else {
        bail!("Not logged in to {}. Run 'ghr auth login' to authenticate.", host);
    };

    let client = GitHubClient::new(config)?;
    let info = verify_token(&client).await?;

    if output.is_json() {
        crate::output::write_json(&json!({
            "host": host,
            "source": source_label(source),
            "kind": TokenKind::detect(&token).to_string(),
            "user": info.user,
            "scopes": info.scopes,
            "rate_limit": info.rate_limit,
        }))?;
        return Ok(());
    }

    let color = output.color_enabled();
    println!("{}", host);
    print_field("  Logged in as", &info.user.login, color);
    print_field("  Token source", &source.to_string(), color);
    print_field("  Token kind", &TokenKind::detect(&token).to_string(), color);
    let shown = if args.show_token {
        token.clone()
    } else {
        mask_token(&token)
    };
    print_field("  Token", &shown, color);
    if !info.scopes.is_empty() {
        print_field("  Scopes", &info.scopes.join(", "), color);
    }
    if let Some(rate) = info.rate_limit {
        if let (Some(remaining), Some(limit)) = (rate.remaining, rate.limit) {
            print_field("  Rate limit", &format!("{}/{} remaining", remaining, limit), color);
        }
    }
    Ok(())
}

fn token(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    match config.token {
        Some(token) => {
            println!("{}", token);
            Ok(())
        }
        None => bail!("No token found for {}", web_host(&config.host)),
    }
}

fn source_label(source: TokenSource) -> String {
    match source {
        TokenSource::Flag => "flag".to_string(),
        TokenSource::Environment(var) => var.to_string(),
        TokenSource::ConfigFile => "config".to_string(),
        TokenSource::Keyring => "keyring".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(TokenSource::Environment("GH_TOKEN")), "GH_TOKEN");
        assert_eq!(source_label(TokenSource::Keyring), "keyring");
    }
}
