//! Command-line surface: `<file> <percentage>` plus the optional
//! per-pattern dump flag.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

#[derive(Parser)]
#[command(name = "tree-miner")]
#[command(version, about = "Mines frequent embedded ordered subtrees from a tree database")]
pub struct Cli {
    /// Path to the database file (one tree per non-blank line).
    pub file: PathBuf,

    /// Minimum support as a percentage of the database, in (0, 100].
    pub percentage: f64,

    /// Dump every discovered pattern's serialization to stdout.
    #[arg(long)]
    pub emit_patterns: bool,
}

impl Cli {
    /// Validates `percentage` and computes `min_sup` for a database of
    /// `tree_count` trees. `min_sup` is floored, then clamped to at least 1.
    pub fn min_sup(&self, tree_count: usize) -> Result<usize, Error> {
        if !(self.percentage > 0.0 && self.percentage <= 100.0) {
            return Err(Error::UsageError(format!(
                "percentage must lie in (0, 100], got {}",
                self.percentage
            )));
        }

        let raw = (tree_count as f64 * self.percentage / 100.0).floor() as usize;
        Ok(raw.max(1))
    }
}
