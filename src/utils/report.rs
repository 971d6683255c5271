//! A stopwatch and the final `stderr` summary, kept separate from the `log`
//! facade so the summary prints regardless of `RUST_LOG`.

use std::time::Instant;

/// Brackets one timed section of the run. Mirrors the reference
/// implementation's scoping: only the call into the mining entry point is
/// timed, not database loading.
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch { start: Instant::now() }
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

/// The summary a mining run prints to `stderr` on completion.
pub struct Summary<'a> {
    pub database_path: &'a str,
    pub tree_count: usize,
    pub percentage: f64,
    pub pattern_count: usize,
    pub max_size: usize,
    pub elapsed_millis: u128,
}

impl Summary<'_> {
    pub fn print(&self) {
        eprintln!("database: {}", self.database_path);
        eprintln!("trees: {}", self.tree_count);
        eprintln!("support: {}%", self.percentage);
        eprintln!("patterns: {}", self.pattern_count);
        eprintln!("max pattern size: {}", self.max_size);
        eprintln!("elapsed: {} ms", self.elapsed_millis);
    }
}
