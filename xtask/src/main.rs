//! Build tasks for the pdbview workspace.
//!
//! Usage:
//!   cargo xtask build-ui          # Build the sidebar WASM bundle
//!   cargo xtask build-ui --debug  # Same, without release optimizations

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for pdbview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build crates/pdbview-ui with trunk into crates/pdbview-ui/dist
    BuildUi {
        /// Skip release optimizations
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::BuildUi { debug } => build_ui(debug),
    }
}

/// Workspace root (the parent of this crate).
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("failed to run {cmd:?}"))?;
    if !status.success() {
        anyhow::bail!("{cmd:?} failed with {status}");
    }
    Ok(())
}

fn build_ui(debug: bool) -> Result<()> {
    let ui = project_root()?.join("crates/pdbview-ui");
    let mut cmd = Command::new("trunk");
    let _ = cmd.current_dir(&ui).arg("build");
    if !debug {
        let _ = cmd.arg("--release");
    }
    // Assets are served from the custom protocol root.
    let _ = cmd.args(["--public-url", "/"]);
    run_cmd(&mut cmd)?;
    println!("pdbview-ui built into {}", ui.join("dist").display());
    Ok(())
}
