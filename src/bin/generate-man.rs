// Writes the sqview man page (roff) to the given path, or to stdout

use anyhow::{Context, Result};
use clap::CommandFactory;
use sqview::cli::Cli;
use std::io::Write;

fn main() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).context("Failed to render man page")?;

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, &buffer)
                .with_context(|| format!("Failed to write man page to {}", path))?;
            eprintln!("Wrote {}", path);
        }
        None => {
            std::io::stdout()
                .write_all(&buffer)
                .context("Failed to write man page")?;
        }
    }
    Ok(())
}
