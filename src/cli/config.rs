//
//  github-rest
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! These commands read and write the configuration file only. Environment
//! variables and flags are not folded in, so `ghr config list` shows exactly
//! what is on disk.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};

use crate::auth::mask_token;
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the value of a key
    Get(GetArgs),

    /// Set a key
    Set(SetArgs),

    /// Remove a key, restoring its default
    Unset(UnsetArgs),

    /// List every key
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file location
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// One of: host, token, owner, repo, debug, timeout_secs
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,

    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        if !Config::keys().contains(&args.key.as_str()) {
            bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                args.key,
                Config::keys().join(", ")
            );
        }
        let value = Config::load()?.get(&args.key);

        if global.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "key": args.key, "value": value }))?
            );
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, &args.value)?;
        config.validate()?;
        config.save_to(&path)?;

        let shown = match args.key.as_str() {
            "token" => mask_token(args.value.trim()),
            key => config.get(key).unwrap_or_default(),
        };
        global
            .output()
            .write_success(&format!("Set {} to {}", args.key, shown));
        Ok(())
    }

    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        let mut config = Config::load_from(&path)?;
        config.unset(&args.key)?;
        config.save_to(&path)?;

        global.output().write_success(&format!("Unset {}", args.key));
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let entries: Vec<(&str, Option<String>)> = Config::keys()
            .iter()
            .map(|key| {
                let value = config.get(key);
                let value = if *key == "token" {
                    value.map(|token| mask_token(&token))
                } else {
                    value
                };
                (*key, value)
            })
            .collect();

        if global.json {
            let map: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.map_or(Value::Null, Value::String)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        for (key, value) in entries {
            if let Some(value) = value {
                println!("{}={}", key, value);
            }
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        if global.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "path": path, "exists": path.exists() }))?
            );
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}
