//
//  github-rest
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands
//!
//! `pr view` without a number looks up the open pull request whose head is
//! the branch checked out in the current git repository.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use console::style;
use serde_json::json;

use crate::api::github::{DiffFile, MergePullRequest, PullRequest};
use crate::api::query::QueryParams;
use crate::api::GitHubClient;
use crate::context::{GitContext, RepoContext};
use crate::interactive::{prompt_confirm, select};
use crate::output::{
    format_status, print_field, print_header, write_json, TableOutput, TableRow,
};
use crate::util::{format_timestamp, truncate};

use super::issue::StateFilter;
use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests in a repository
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a pull request
    View(ViewArgs),

    /// Merge a pull request
    Merge(MergeArgs),

    /// Close a pull request without merging
    Close(CloseArgs),

    /// Show changed files with line counts
    #[command(name = "diff-stat")]
    DiffStat(DiffStatArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's', value_enum, default_value = "open")]
    pub state: StateFilter,

    /// Filter by base branch
    #[arg(long, short = 'B')]
    pub base: Option<String>,

    /// Filter by head branch (`branch` or `owner:branch`)
    #[arg(long, short = 'H')]
    pub head: Option<String>,

    /// Maximum number of pull requests (one page, at most 100)
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Pull request number; defaults to the PR for the current branch
    pub number: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeMethod {
    Merge,
    Squash,
    Rebase,
}

impl MergeMethod {
    const ALL: [MergeMethod; 3] = [Self::Merge, Self::Squash, Self::Rebase];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Squash => "squash",
            Self::Rebase => "rebase",
        }
    }
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    pub number: u64,

    /// Merge strategy; prompted for when omitted
    #[arg(long, short = 'm', value_enum)]
    pub method: Option<MergeMethod>,

    /// Title of the merge commit
    #[arg(long, short = 't')]
    pub subject: Option<String>,

    /// Body of the merge commit
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    pub number: u64,

    /// Leave a comment before closing
    #[arg(long, short = 'c')]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct DiffStatArgs {
    pub number: u64,

    /// Print the patches as well
    #[arg(long, short = 'p')]
    pub patch: bool,
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, global).await,
            PrSubcommand::View(args) => self.view(args, global).await,
            PrSubcommand::Merge(args) => self.merge(args, global).await,
            PrSubcommand::Close(args) => self.close(args, global).await,
            PrSubcommand::DiffStat(args) => self.diff_stat(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let head = args.head.as_deref().map(|head| qualify_head(&ctx, head));
        let params = QueryParams::new()
            .set("state", args.state.as_str())
            .set("per_page", args.limit.clamp(1, 100))
            .set_opt("base", args.base.as_deref())
            .set_opt("head", head);

        let pulls = client.list_pulls(&ctx.owner, &ctx.repo, Some(&params)).await?;
        global.output().write_list(
            &pulls,
            &format!("No pull requests match your search in {}", ctx.full_name()),
        )
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let number = match args.number {
            Some(number) => number,
            None => pull_for_current_branch(&client, &ctx).await?,
        };

        let pull = client.get_pull(&ctx.owner, &ctx.repo, number).await?;
        global.output().write(&pull)
    }

    async fn merge(&self, args: &MergeArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();

        if client.is_pull_merged(&ctx.owner, &ctx.repo, args.number).await? {
            bail!("Pull request #{} is already merged", args.number);
        }

        let method = match args.method {
            Some(method) => method,
            None if global.can_prompt() => {
                let labels: Vec<&str> = MergeMethod::ALL.iter().map(|m| m.as_str()).collect();
                MergeMethod::ALL[select("Merge method", &labels)?]
            }
            None => MergeMethod::Merge,
        };

        if !args.yes && global.can_prompt() {
            let question = format!("{} pull request #{}?", capitalize(method.as_str()), args.number);
            if !prompt_confirm(&question, true)? {
                output.write_info("Merge cancelled");
                return Ok(());
            }
        }

        let request = MergePullRequest {
            commit_title: args.subject.clone(),
            commit_message: args.body.clone(),
            merge_method: Some(method.as_str().to_string()),
            ..MergePullRequest::default()
        };
        let result = client
            .merge_pull(&ctx.owner, &ctx.repo, args.number, &request)
            .await?;

        if output.is_json() {
            return write_json(&result);
        }
        if !result.merged {
            bail!("Pull request #{} was not merged: {}", args.number, result.message);
        }
        output.write_success(&format!(
            "Merged pull request #{} ({})",
            args.number,
            method.as_str()
        ));
        Ok(())
    }

    async fn close(&self, args: &CloseArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();

        if let Some(comment) = &args.comment {
            client
                .create_issue_comment(&ctx.owner, &ctx.repo, args.number, comment)
                .await?;
        }

        let pull = client.close_pull(&ctx.owner, &ctx.repo, args.number).await?;
        if output.is_json() {
            return write_json(&pull);
        }
        output.write_success(&format!("Closed pull request #{} ({})", pull.number, pull.title));
        Ok(())
    }

    async fn diff_stat(&self, args: &DiffStatArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();
        let params = QueryParams::new().set("per_page", 100);
        let files = client
            .list_pull_files(&ctx.owner, &ctx.repo, args.number, Some(&params))
            .await?;

        let (additions, deletions) = totals(&files);
        if output.is_json() {
            return write_json(&json!({
                "files": files,
                "additions": additions,
                "deletions": deletions,
            }));
        }

        output.write_list(&files, "No files changed")?;
        if !files.is_empty() {
            println!(
                "{} files changed, {} insertions(+), {} deletions(-)",
                files.len(),
                additions,
                deletions
            );
        }

        if args.patch {
            println!();
            println!("{}", client.pull_patches(&ctx.owner, &ctx.repo, args.number).await?);
        }
        Ok(())
    }
}

/// GitHub only matches `head` filters written as `owner:branch`.
fn qualify_head(ctx: &RepoContext, head: &str) -> String {
    if head.contains(':') {
        head.to_string()
    } else {
        format!("{}:{}", ctx.owner, head)
    }
}

async fn pull_for_current_branch(client: &GitHubClient, ctx: &RepoContext) -> Result<u64> {
    let branch = GitContext::open()
        .and_then(|git| git.current_branch())
        .context("Pass a pull request number or run inside a git checkout")?;

    let params = QueryParams::new()
        .set("state", "open")
        .set("head", qualify_head(ctx, &branch));
    let pulls = client.list_pulls(&ctx.owner, &ctx.repo, Some(&params)).await?;

    match pulls.first() {
        Some(pull) => Ok(pull.number),
        None => bail!("No open pull request found for branch '{}'", branch),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn totals(files: &[DiffFile]) -> (u64, u64) {
    files
        .iter()
        .fold((0, 0), |(add, del), file| (add + file.additions, del + file.deletions))
}

fn pull_state(pull: &PullRequest) -> &str {
    if pull.is_merged() {
        "merged"
    } else if pull.draft && pull.state == "open" {
        "draft"
    } else {
        pull.state.as_str()
    }
}

impl TableRow for PullRequest {
    fn headers() -> &'static [&'static str] {
        &["#", "TITLE", "BRANCH", "STATE", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.number.to_string(),
            truncate(&self.title, 60),
            self.head.ref_name.clone(),
            format_status(pull_state(self), color),
            self.updated_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ]
    }
}

impl TableOutput for PullRequest {
    fn print_table(&self, color: bool) {
        print_header(&format!("#{} {}", self.number, self.title));
        println!();

        print_field("State", &format_status(pull_state(self), color), color);
        if let Some(user) = &self.user {
            print_field("Author", &user.login, color);
        }
        let branches = format!("{} <- {}", self.base.ref_name, self.head.label);
        print_field("Branches", &branches, color);

        if let (Some(additions), Some(deletions)) = (self.additions, self.deletions) {
            let changes = if color {
                format!(
                    "{} {}",
                    style(format!("+{}", additions)).green(),
                    style(format!("-{}", deletions)).red()
                )
            } else {
                format!("+{} -{}", additions, deletions)
            };
            print_field("Changes", &changes, color);
        }
        if let Some(files) = self.changed_files {
            print_field("Files", &files.to_string(), color);
        }
        if let Some(mergeable) = self.mergeable {
            print_field("Mergeable", if mergeable { "yes" } else { "no" }, color);
        }
        if !self.requested_reviewers.is_empty() {
            let reviewers: Vec<&str> = self
                .requested_reviewers
                .iter()
                .map(|u| u.login.as_str())
                .collect();
            print_field("Reviewers", &reviewers.join(", "), color);
        }
        print_field("URL", &self.html_url, color);

        if let Some(body) = self.body.as_deref().filter(|b| !b.trim().is_empty()) {
            println!();
            println!("{}", body);
        }
    }
}

impl TableRow for DiffFile {
    fn headers() -> &'static [&'static str] {
        &["FILE", "STATUS", "+", "-"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let name = match &self.previous_filename {
            Some(previous) => format!("{} -> {}", previous, self.filename),
            None => self.filename.clone(),
        };
        let (add, del) = (format!("+{}", self.additions), format!("-{}", self.deletions));
        if color {
            vec![
                name,
                self.status.clone(),
                style(add).green().to_string(),
                style(del).red().to_string(),
            ]
        } else {
            vec![name, self.status.clone(), add, del]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TableBuilder;

    fn file(name: &str, additions: u64, deletions: u64) -> DiffFile {
        serde_json::from_value(json!({
            "filename": name,
            "status": "modified",
            "additions": additions,
            "deletions": deletions,
            "changes": additions + deletions
        }))
        .unwrap()
    }

    fn ctx() -> RepoContext {
        RepoContext {
            host: "github.com".to_string(),
            owner: "octo".to_string(),
            repo: "hello".to_string(),
        }
    }

    #[test]
    fn test_qualify_head() {
        assert_eq!(qualify_head(&ctx(), "feature"), "octo:feature");
        assert_eq!(qualify_head(&ctx(), "fork:feature"), "fork:feature");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("squash"), "Squash");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_totals() {
        let files = vec![file("a.rs", 10, 2), file("b.rs", 1, 7)];
        assert_eq!(totals(&files), (11, 9));
        assert_eq!(totals(&[]), (0, 0));
    }

    #[test]
    fn test_diff_file_table() {
        let files = [file("src/lib.rs", 3, 1)];
        let rendered = TableBuilder::new()
            .headers(DiffFile::headers().iter().copied())
            .rows(files.iter().map(|f| f.row(false)))
            .render();
        assert!(rendered.contains("src/lib.rs"));
        assert!(rendered.contains("+3"));
    }
}
