//! claude-workspace - Working directory resolution for Claude Code wrappers
//!
//! CLI entry point. Resolves, holds and sweeps wrapper workspaces.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use claude_workspace::cli::{print_cleaned, print_kept, print_resolved, render_prune_report};
use claude_workspace::workspace::{find_workspaces, prune_workspaces, DEFAULT_MIN_AGE};
use claude_workspace::{logging, DirectoryResolver, WorkspaceConfig};

/// Working directory resolver for Claude Code wrappers
///
/// Picks the directory to run `claude` in: `--cwd`, then `CLAUDE_CWD`,
/// then a fresh temporary workspace.
#[derive(Parser, Debug)]
#[command(name = "claude-workspace", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the working directory and print its path
    Resolve {
        /// Explicit working directory (overrides CLAUDE_CWD)
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Print a JSON snapshot instead of the bare path
        #[arg(long)]
        json: bool,
        /// Leave a temporary workspace in place for the caller
        #[arg(long)]
        keep: bool,
    },
    /// Resolve the working directory and hold it until SIGINT or SIGTERM
    Hold {
        /// Explicit working directory (overrides CLAUDE_CWD)
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Print a JSON snapshot instead of the bare path
        #[arg(long)]
        json: bool,
    },
    /// List leftover temporary workspaces
    List {
        /// Directory to scan (system temp dir by default)
        #[arg(long)]
        temp_root: Option<PathBuf>,
        /// Print JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },
    /// Remove leftover temporary workspaces
    Prune {
        /// Directory to scan (system temp dir by default)
        #[arg(long)]
        temp_root: Option<PathBuf>,
        /// Only remove workspaces not modified for this many seconds
        #[arg(long, default_value_t = DEFAULT_MIN_AGE.as_secs())]
        older_than: u64,
        /// Report what would be removed without removing anything
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve { cwd, json, keep } => resolve(cwd, json, keep),
        Command::Hold { cwd, json } => hold(cwd, json).await,
        Command::List { temp_root, json } => list(temp_root, json),
        Command::Prune {
            temp_root,
            older_than,
            dry_run,
            json,
        } => prune(temp_root, Duration::from_secs(older_than), dry_run, json),
    }
}

/// Build the resolver from `--cwd` and `CLAUDE_CWD`.
fn open_workspace(cwd: Option<PathBuf>) -> Result<DirectoryResolver> {
    let config = WorkspaceConfig::from_env(cwd);
    DirectoryResolver::new(&config).context("Failed to resolve working directory")
}

/// Print the resolution. If the caller cannot be told where the workspace
/// is, a temporary one is released before the error is returned.
fn announce_workspace(resolver: &DirectoryResolver, json: bool) -> Result<()> {
    let resolved = resolver.resolved();
    let printed = if json {
        print_json(&resolved)
    } else {
        print_resolved(&resolved);
        print_line(&resolved.path.display())
    };

    if let Err(e) = printed {
        close_workspace(resolver)?;
        return Err(e);
    }
    Ok(())
}

/// Remove the resolver's temporary workspace, if any, and report it.
fn close_workspace(resolver: &DirectoryResolver) -> Result<()> {
    resolver
        .cleanup()
        .context("Failed to remove temporary workspace")?;
    if let Some(path) = resolver.temp_dir() {
        print_cleaned(path);
    }
    Ok(())
}

fn resolve(cwd: Option<PathBuf>, json: bool, keep: bool) -> Result<()> {
    let resolver = open_workspace(cwd)?;
    announce_workspace(&resolver, json)?;
    match resolver.temp_dir() {
        Some(path) if keep => {
            print_kept(path);
            Ok(())
        }
        _ => close_workspace(&resolver),
    }
}

async fn hold(cwd: Option<PathBuf>, json: bool) -> Result<()> {
    // Listen before announcing so a signal sent right after the path is
    // printed still releases the workspace
    let shutdown = shutdown_signal()?;
    let resolver = open_workspace(cwd)?;
    announce_workspace(&resolver, json)?;
    eprintln!("Holding workspace, send Ctrl-C or SIGTERM to release");

    shutdown.await;
    close_workspace(&resolver)
}

/// Resolves on the first SIGINT or SIGTERM.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::debug!("received SIGINT"),
            _ = terminate.recv() => tracing::debug!("received SIGTERM"),
        }
    })
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    Ok(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C, releasing workspace");
        }
    })
}

fn list(temp_root: Option<PathBuf>, json: bool) -> Result<()> {
    let root = temp_root.unwrap_or_else(std::env::temp_dir);
    let found = find_workspaces(&root)
        .with_context(|| format!("Failed to scan '{}'", root.display()))?;

    if json {
        print_json(&found)?;
    } else {
        for path in &found {
            print_line(&path.display())?;
        }
    }
    Ok(())
}

fn prune(temp_root: Option<PathBuf>, min_age: Duration, dry_run: bool, json: bool) -> Result<()> {
    let root = temp_root.unwrap_or_else(std::env::temp_dir);
    let report = prune_workspaces(&root, min_age, dry_run)
        .with_context(|| format!("Failed to scan '{}'", root.display()))?;

    if json {
        print_json(&report)?;
    } else {
        eprintln!("{}", render_prune_report(&report));
    }

    if report.is_clean() {
        Ok(())
    } else {
        anyhow::bail!("{} workspace(s) could not be removed", report.failed.len())
    }
}

/// Write one line to stdout, returning broken pipes as errors.
fn print_line(value: &dyn std::fmt::Display) -> Result<()> {
    writeln!(io::stdout().lock(), "{value}").context("Failed to write to stdout")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    print_line(&json)
}
