//
//  github-rest
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::github::Repository;
use crate::api::query::QueryParams;
use crate::output::{format_bool, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::{format_timestamp, truncate};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// Show a repository
    View(ViewArgs),

    /// List repositories of the authenticated user or an owner
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository (OWNER/REPO); defaults to the current repository
    pub repo: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List repositories of this user or organization
    #[arg(long, short = 'o')]
    pub owner: Option<String>,

    /// Maximum number of repositories (one page, at most 100)
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: u32,

    /// Sort by created, updated, pushed or full_name
    #[arg(long)]
    pub sort: Option<String>,

    /// Filter by visibility (authenticated user only): all, public, private
    #[arg(long)]
    pub visibility: Option<String>,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::View(args) => self.view(args, global).await,
            RepoSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let ctx = global.repo_context(&config, args.repo.as_deref())?;
        let client = super::client_for(config)?;

        let repo = client.get_repo(&ctx.owner, &ctx.repo).await?;
        global.output().write(&repo)
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let params = QueryParams::new()
            .set("per_page", args.limit.clamp(1, 100))
            .set_opt("sort", args.sort.as_deref());

        let repos = match &args.owner {
            Some(owner) => client.list_owner_repos(owner, Some(&params)).await?,
            None => {
                let params = params.set_opt("visibility", args.visibility.as_deref());
                client.list_user_repos(Some(&params)).await?
            }
        };

        global.output().write_list(&repos, "No repositories found")
    }
}

fn visibility(repo: &Repository) -> &str {
    repo.visibility
        .as_deref()
        .unwrap_or(if repo.private { "private" } else { "public" })
}

impl TableRow for Repository {
    fn headers() -> &'static [&'static str] {
        &["NAME", "VISIBILITY", "LANGUAGE", "DESCRIPTION", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let vis = visibility(self);
        let vis = if color && vis != "public" {
            style(vis).yellow().to_string()
        } else {
            vis.to_string()
        };
        vec![
            self.full_name.clone(),
            vis,
            self.language.clone().unwrap_or_else(|| "-".to_string()),
            truncate(self.description.as_deref().unwrap_or(""), 50),
            self.updated_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ]
    }
}

impl TableOutput for Repository {
    fn print_table(&self, color: bool) {
        print_header(&self.full_name);
        println!();

        print_optional_field("Description", self.description.as_deref(), color);
        print_field("Visibility", visibility(self), color);
        print_optional_field("Language", self.language.as_deref(), color);
        print_optional_field("Default branch", self.default_branch.as_deref(), color);
        if !self.topics.is_empty() {
            print_field("Topics", &self.topics.join(", "), color);
        }
        print_field("Fork", &format_bool(self.fork, color), color);
        print_field("Archived", &format_bool(self.archived, color), color);

        println!();
        print_field("Stars", &self.stargazers_count.to_string(), color);
        print_field("Forks", &self.forks_count.to_string(), color);
        print_field("Open issues", &self.open_issues_count.to_string(), color);

        println!();
        print_field("Web URL", &self.html_url, color);
        print_optional_field("SSH URL", self.ssh_url.as_deref(), color);
        print_optional_field("HTTPS URL", self.clone_url.as_deref(), color);

        if let Some(pushed) = &self.pushed_at {
            println!();
            print_field("Last push", &format_timestamp(pushed), color);
        }
    }
}
