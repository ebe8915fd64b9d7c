//
//  github-rest
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github_rest::api::ApiError;
use github_rest::cli::{Cli, Commands};
use github_rest::exit_codes;

/// Environment variable holding a full `tracing` filter directive.
const ENV_LOG: &str = "GHR_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.debug_requested());

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
///
/// `GHR_LOG` wins; otherwise warnings only, or the library's request logs
/// when debug is on.
fn init_logging(debug: bool) {
    let default = if debug { "warn,github_rest=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(err) if err.is_rate_limited() => exit_codes::RATE_LIMIT,
        Some(err) if err.status() == Some(401) => exit_codes::AUTH_ERROR,
        Some(err) if err.is_not_found() => exit_codes::NOT_FOUND,
        Some(ApiError::UnsupportedVerb(_)) | Some(ApiError::InvalidUrl(_)) => exit_codes::USAGE,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Issue(cmd) => cmd.run(&cli.global).await,
        Commands::Pr(cmd) => cmd.run(&cli.global).await,
        Commands::Release(cmd) => cmd.run(&cli.global).await,
        Commands::RateLimit(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", github_rest::APP_NAME, github_rest::VERSION);
            Ok(())
        }
    }
}
