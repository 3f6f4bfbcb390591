use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for renes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci,
    /// Quick checks before commit (fmt, clippy)
    Check,
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Include the ROM-driven ignored tests
        #[arg(long)]
        ignored: bool,
    },
    /// Run benchmarks
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Check => run_check(),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test { ignored } => run_test(ignored),
        Commands::Bench => run_cargo(&["bench"]),
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());
    let start = Instant::now();

    run_task("Format Check", || run_fmt(true))?;
    run_task("Clippy", || run_clippy(false))?;
    run_task("Build", || run_build(false))?;
    run_task("Test", || run_test(false))?;

    println!(
        "\n{} {}",
        "CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_check() -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());
    run_task("Format Check", || run_fmt(true))?;
    run_task("Clippy", || run_clippy(false))?;
    println!("\n{}", "Checks passed".green().bold());
    Ok(())
}

fn run_task(name: &str, task: impl FnOnce() -> Result<()>) -> Result<()> {
    println!("{} {}", "->".cyan().bold(), name.bold());
    task()
}

fn run_fmt(check: bool) -> Result<()> {
    let mut args = vec!["fmt", "--all"];
    if check {
        args.push("--check");
    }
    run_cargo(&args)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut args = vec!["clippy", "--all-targets"];
    if fix {
        args.push("--fix");
        args.push("--allow-dirty");
    }
    args.extend(["--", "-D", "warnings"]);
    run_cargo(&args)
}

fn run_build(release: bool) -> Result<()> {
    let mut args = vec!["build"];
    if release {
        args.push("--release");
    }
    run_cargo(&args)
}

fn run_test(ignored: bool) -> Result<()> {
    run_cargo(&["test"])?;
    if ignored {
        run_cargo(&["test", "--", "--ignored"])?;
    }
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
