use clap::Parser;
use crate::config::QueueConfig;
use crate::query::{collect_queue, current_user, QueryRunner, SqueueRunner};
use crate::cli::output::{format_queue_table, get_terminal_width, is_tty, TableOptions};
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Parser)]
#[command(name = "sqview")]
#[command(about = "Show your Slurm job queue as a color-coded table")]
#[command(long_about = "Show your Slurm job queue as a color-coded table.\n\n\
    Runs squeue once to list the jobs of $USER, then once per column and job \
    so that values containing spaces or separators are never mis-split.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {}

pub fn run() -> Result<()> {
    // Only --help and --version; anything else is rejected by clap
    let _cli = Cli::parse();

    let config = QueueConfig::default();
    let user = current_user()?;
    let mut runner = SqueueRunner::new();

    let options = TableOptions {
        max_width: if is_tty() { Some(get_terminal_width()) } else { None },
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    show_queue(&mut runner, &user, &config, &options, &mut out)?;
    log::info!("squeue invoked {} time(s)", runner.invocations());
    Ok(())
}

/// Query the queue of `user` and write the rendered table to `out`
pub fn show_queue<R: QueryRunner, W: Write>(
    runner: &mut R,
    user: &str,
    config: &QueueConfig,
    options: &TableOptions,
    out: &mut W,
) -> Result<()> {
    let snapshot = collect_queue(runner, user, config)
        .with_context(|| format!("Failed to collect the job queue for {}", user))?;

    let table = format_queue_table(config, &snapshot, options);
    out.write_all(table.as_bytes())
        .context("Failed to write queue table")?;
    out.flush().context("Failed to write queue table")?;
    Ok(())
}
