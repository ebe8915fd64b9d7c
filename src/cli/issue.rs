//
//  github-rest
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue commands
//!
//! Pull requests come back from the issues API too; `issue list` filters them
//! out so that its numbers only ever refer to plain issues.

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use console::style;
use serde_json::json;

use crate::api::github::{CreateIssueRequest, Issue, IssueComment, UpdateIssueRequest};
use crate::api::query::QueryParams;
use crate::interactive::{prompt_editor, prompt_input};
use crate::output::{
    format_status, print_field, print_header, write_json, TableOutput, TableRow,
};
use crate::util::{format_timestamp, truncate};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// List issues in a repository
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show an issue
    View(ViewArgs),

    /// Create an issue
    Create(CreateArgs),

    /// Add a comment to an issue
    Comment(CommentArgs),

    /// Close an issue
    Close(CloseArgs),

    /// Reopen a closed issue
    Reopen(NumberArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's', value_enum, default_value = "open")]
    pub state: StateFilter,

    /// Filter by label (repeatable)
    #[arg(long, short = 'l', action = clap::ArgAction::Append)]
    pub label: Vec<String>,

    /// Filter by assignee login, "none" or "*"
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Filter by author login
    #[arg(long, short = 'A')]
    pub author: Option<String>,

    /// Maximum number of issues (one page, at most 100)
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    pub number: u64,

    /// Include comments
    #[arg(long, short = 'c')]
    pub comments: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Label to add (repeatable)
    #[arg(long, short = 'l', action = clap::ArgAction::Append)]
    pub label: Vec<String>,

    /// Login to assign (repeatable)
    #[arg(long, short = 'a', action = clap::ArgAction::Append)]
    pub assignee: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    pub number: u64,

    /// Comment text; opens an editor when omitted
    #[arg(long, short = 'b')]
    pub body: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Completed,
    NotPlanned,
}

impl CloseReason {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NotPlanned => "not_planned",
        }
    }
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    pub number: u64,

    #[arg(long, short = 'r', value_enum)]
    pub reason: Option<CloseReason>,

    /// Leave a comment before closing
    #[arg(long, short = 'c')]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct NumberArgs {
    pub number: u64,
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            IssueSubcommand::List(args) => self.list(args, global).await,
            IssueSubcommand::View(args) => self.view(args, global).await,
            IssueSubcommand::Create(args) => self.create(args, global).await,
            IssueSubcommand::Comment(args) => self.comment(args, global).await,
            IssueSubcommand::Close(args) => self.close(args, global).await,
            IssueSubcommand::Reopen(args) => self.reopen(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let params = list_params(args);

        let issues: Vec<Issue> = client
            .list_repo_issues(&ctx.owner, &ctx.repo, Some(&params))
            .await?
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .collect();

        global
            .output()
            .write_list(&issues, &format!("No issues match your search in {}", ctx.full_name()))
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();
        let issue = client.get_issue(&ctx.owner, &ctx.repo, args.number).await?;

        if !args.comments {
            return output.write(&issue);
        }

        let params = QueryParams::new().set("per_page", 100);
        let comments = client
            .list_issue_comments(&ctx.owner, &ctx.repo, args.number, Some(&params))
            .await?;

        if output.is_json() {
            return write_json(&json!({ "issue": issue, "comments": comments }));
        }

        issue.print_table(output.color_enabled());
        for comment in &comments {
            println!();
            print_comment(comment, output.color_enabled());
        }
        Ok(())
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();

        let title = match &args.title {
            Some(title) => title.clone(),
            None if global.can_prompt() => prompt_input("Title")?,
            None => bail!("--title is required when prompts are disabled"),
        };
        if title.trim().is_empty() {
            bail!("Title cannot be empty");
        }

        let body = match &args.body {
            Some(body) => Some(body.clone()),
            None if global.can_prompt() => prompt_editor(None)?,
            None => None,
        };

        let request = CreateIssueRequest {
            title,
            body,
            assignees: args.assignee.clone(),
            labels: args.label.clone(),
            ..CreateIssueRequest::default()
        };

        let issue = client.create_issue(&ctx.owner, &ctx.repo, &request).await?;
        if output.is_json() {
            return write_json(&issue);
        }
        output.write_success(&format!("Created issue #{} in {}", issue.number, ctx.full_name()));
        println!("{}", issue.html_url);
        Ok(())
    }

    async fn comment(&self, args: &CommentArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();

        let body = match &args.body {
            Some(body) => body.clone(),
            None if global.can_prompt() => prompt_editor(None)?.unwrap_or_default(),
            None => bail!("--body is required when prompts are disabled"),
        };
        if body.trim().is_empty() {
            bail!("Comment cannot be empty");
        }

        let comment = client
            .create_issue_comment(&ctx.owner, &ctx.repo, args.number, &body)
            .await?;
        if output.is_json() {
            return write_json(&comment);
        }
        output.write_success(&format!("Commented on #{}", args.number));
        println!("{}", comment.html_url);
        Ok(())
    }

    async fn close(&self, args: &CloseArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;

        if let Some(comment) = &args.comment {
            client
                .create_issue_comment(&ctx.owner, &ctx.repo, args.number, comment)
                .await?;
        }

        let request = UpdateIssueRequest {
            state: Some("closed".to_string()),
            state_reason: args.reason.map(|r| r.as_str().to_string()),
            ..UpdateIssueRequest::default()
        };
        let issue = client
            .update_issue(&ctx.owner, &ctx.repo, args.number, &request)
            .await?;

        report_state(global, &issue, "Closed")
    }

    async fn reopen(&self, args: &NumberArgs, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let request = UpdateIssueRequest {
            state: Some("open".to_string()),
            state_reason: Some("reopened".to_string()),
            ..UpdateIssueRequest::default()
        };
        let issue = client
            .update_issue(&ctx.owner, &ctx.repo, args.number, &request)
            .await?;

        report_state(global, &issue, "Reopened")
    }
}

fn list_params(args: &ListArgs) -> QueryParams {
    let labels = (!args.label.is_empty()).then(|| args.label.join(","));
    QueryParams::new()
        .set("state", args.state.as_str())
        .set("per_page", args.limit.clamp(1, 100))
        .set_opt("labels", labels)
        .set_opt("assignee", args.assignee.as_deref())
        .set_opt("creator", args.author.as_deref())
}

fn report_state(global: &GlobalOptions, issue: &Issue, verb: &str) -> Result<()> {
    let output = global.output();
    if output.is_json() {
        return write_json(issue);
    }
    output.write_success(&format!("{} issue #{} ({})", verb, issue.number, issue.title));
    Ok(())
}

fn print_comment(comment: &IssueComment, color: bool) {
    let author = comment
        .user
        .as_ref()
        .map(|u| u.login.as_str())
        .unwrap_or("ghost");
    let when = comment
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    if color {
        println!("{} {}", style(author).bold(), style(when).dim());
    } else {
        println!("{} {}", author, when);
    }
    println!("{}", comment.body.as_deref().unwrap_or(""));
}

fn label_names(issue: &Issue) -> String {
    issue
        .labels
        .iter()
        .map(|label| label.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableRow for Issue {
    fn headers() -> &'static [&'static str] {
        &["#", "TITLE", "STATE", "LABELS", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.number.to_string(),
            truncate(&self.title, 60),
            format_status(&self.state, color),
            label_names(self),
            self.updated_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ]
    }
}

impl TableOutput for Issue {
    fn print_table(&self, color: bool) {
        print_header(&format!("#{} {}", self.number, self.title));
        println!();

        let mut state = format_status(&self.state, color);
        if let Some(reason) = &self.state_reason {
            state = format!("{} ({})", state, reason);
        }
        print_field("State", &state, color);
        if let Some(user) = &self.user {
            print_field("Author", &user.login, color);
        }
        if !self.labels.is_empty() {
            print_field("Labels", &label_names(self), color);
        }
        if !self.assignees.is_empty() {
            let assignees: Vec<&str> = self.assignees.iter().map(|u| u.login.as_str()).collect();
            print_field("Assignees", &assignees.join(", "), color);
        }
        if let Some(milestone) = &self.milestone {
            print_field("Milestone", &milestone.title, color);
        }
        print_field("Comments", &self.comments.to_string(), color);
        if let Some(created) = &self.created_at {
            print_field("Created", &format_timestamp(created), color);
        }
        print_field("URL", &self.html_url, color);

        if let Some(body) = self.body.as_deref().filter(|b| !b.trim().is_empty()) {
            println!();
            println!("{}", body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::assemble_query_params;
    use crate::api::github::ISSUE_LIST_PARAMS;

    #[test]
    fn test_list_params_join_labels() {
        let args = ListArgs {
            state: StateFilter::All,
            label: vec!["bug".to_string(), "help wanted".to_string()],
            assignee: None,
            author: Some("octocat".to_string()),
            limit: 500,
        };
        assert_eq!(
            assemble_query_params(Some(&list_params(&args)), ISSUE_LIST_PARAMS),
            "state=all&creator=octocat&labels=bug%2Chelp%20wanted&per_page=100"
        );
    }

    #[test]
    fn test_list_params_without_labels() {
        let args = ListArgs {
            state: StateFilter::Open,
            label: Vec::new(),
            assignee: Some("*".to_string()),
            author: None,
            limit: 10,
        };
        let params = list_params(&args);
        assert!(params.get("labels").is_none());
        assert_eq!(
            assemble_query_params(Some(&params), ISSUE_LIST_PARAMS),
            "state=open&assignee=%2A&per_page=10"
        );
    }
}
