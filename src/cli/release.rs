//
//  github-rest
//  cli/release.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Release commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::github::{Release, ReleaseAsset};
use crate::api::query::QueryParams;
use crate::output::{
    format_status, print_field, print_header, print_optional_field, TableBuilder, TableOutput,
    TableRow,
};
use crate::util::{format_size, format_timestamp};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ReleaseCommand {
    #[command(subcommand)]
    pub command: ReleaseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReleaseSubcommand {
    /// List releases, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show the release for a tag
    View(ViewArgs),

    /// Show the latest published release
    Latest,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of releases (one page, at most 100)
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    pub tag: String,
}

impl ReleaseCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, ctx) = global.repo_client()?;
        let output = global.output();

        match &self.command {
            ReleaseSubcommand::List(args) => {
                let params = QueryParams::new().set("per_page", args.limit.clamp(1, 100));
                let releases = client
                    .list_releases(&ctx.owner, &ctx.repo, Some(&params))
                    .await?;
                output.write_list(&releases, &format!("No releases in {}", ctx.full_name()))
            }
            ReleaseSubcommand::View(args) => {
                let release = client
                    .get_release_by_tag(&ctx.owner, &ctx.repo, &args.tag)
                    .await?;
                output.write(&release)
            }
            ReleaseSubcommand::Latest => {
                let release = client.get_latest_release(&ctx.owner, &ctx.repo).await?;
                output.write(&release)
            }
        }
    }
}

fn release_kind(release: &Release) -> &'static str {
    if release.draft {
        "draft"
    } else if release.prerelease {
        "prerelease"
    } else {
        "published"
    }
}

impl TableRow for Release {
    fn headers() -> &'static [&'static str] {
        &["TITLE", "TAG", "TYPE", "PUBLISHED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.display_name().to_string(),
            self.tag_name.clone(),
            format_status(release_kind(self), color),
            self.published_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ]
    }
}

impl TableOutput for Release {
    fn print_table(&self, color: bool) {
        print_header(self.display_name());
        println!();

        print_field("Tag", &self.tag_name, color);
        print_field("Type", &format_status(release_kind(self), color), color);
        print_optional_field("Target", self.target_commitish.as_deref(), color);
        if let Some(author) = &self.author {
            print_field("Author", &author.login, color);
        }
        if let Some(published) = &self.published_at {
            print_field("Published", &format_timestamp(published), color);
        }
        print_field("URL", &self.html_url, color);

        if let Some(body) = self.body.as_deref().filter(|b| !b.trim().is_empty()) {
            println!();
            println!("{}", body);
        }

        if !self.assets.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["ASSET", "SIZE", "DOWNLOADS"])
                .rows(self.assets.iter().map(asset_row))
                .print();
        }
    }
}

fn asset_row(asset: &ReleaseAsset) -> Vec<String> {
    vec![
        asset.name.clone(),
        format_size(asset.size),
        asset.download_count.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn release(draft: bool, prerelease: bool) -> Release {
        serde_json::from_value(json!({
            "id": 1,
            "tag_name": "v0.3.0",
            "name": "",
            "draft": draft,
            "prerelease": prerelease,
            "html_url": "https://github.com/octo/hello/releases/tag/v0.3.0",
            "assets": [{
                "id": 7,
                "name": "ghr-x86_64.tar.gz",
                "size": 2048,
                "download_count": 12,
                "browser_download_url": "https://github.com/octo/hello/releases/download/v0.3.0/ghr-x86_64.tar.gz"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_release_kind() {
        assert_eq!(release_kind(&release(true, true)), "draft");
        assert_eq!(release_kind(&release(false, true)), "prerelease");
        assert_eq!(release_kind(&release(false, false)), "published");
    }

    #[test]
    fn test_row_falls_back_to_tag() {
        let row = release(false, false).row(false);
        assert_eq!(row[0], "v0.3.0");
        assert_eq!(row[2], "published");
    }

    #[test]
    fn test_asset_row() {
        let release = release(false, false);
        let row = asset_row(&release.assets[0]);
        assert_eq!(row[0], "ghr-x86_64.tar.gz");
        assert_eq!(row[2], "12");
    }
}
