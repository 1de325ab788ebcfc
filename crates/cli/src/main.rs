//! `zotero` command-line tool.
//!
//! Results go to stdout, logs and errors to stderr, so `println!` and
//! `eprintln!` are used for user-facing output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod render;
mod settings;

use args::CliArgs;

const WORKSPACE_TARGETS: &[&str] = &["zotero_cli", "zotero_infra", "zotero_core", "zotero_common"];

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => {
            return EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        }
        1 => "debug",
        _ => "trace",
    };
    let directives: Vec<String> =
        WORKSPACE_TARGETS.iter().map(|target| format!("{target}={level}")).collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .init();
}

/// Cancel `token` on Ctrl-C so in-flight requests stop promptly.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    init_logging(args.global.verbose);

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    match commands::run(args, cancel).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
