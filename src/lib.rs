//! sqview - a color-coded table view of your Slurm job queue
//!
//! This library provides:
//! - The compiled-in field and color configuration
//! - The query stage, which asks squeue for one field of one job at a time
//! - The render stage, which pivots the results into a colored table
//! - CLI entry point and error reporting
//!
//! # Example
//!
//! ```no_run
//! use sqview::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
