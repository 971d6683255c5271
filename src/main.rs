use std::process::ExitCode;

use clap::Parser;

use tree_miner::cli::Cli;
use tree_miner::io::database::Database;
use tree_miner::mining::entry::prefix_espan;
use tree_miner::utils::report::{Stopwatch, Summary};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), tree_miner::error::Error> {
    let database = Database::load(&cli.file)?;
    let min_sup = cli.min_sup(database.len())?;

    log::info!("mining started: {} tree(s), min_sup={}", database.len(), min_sup);

    let stopwatch = Stopwatch::start();
    let mut emit = |pattern: &tree_miner::core::pattern::PatternTree| {
        if cli.emit_patterns {
            let serialized: Vec<String> = pattern.to_vector().iter().map(ToString::to_string).collect();
            println!("{}", serialized.join(" "));
        }
    };
    let stats = prefix_espan(database.trees(), min_sup, &mut emit);
    let elapsed_millis = stopwatch.elapsed_millis();

    log::info!("mining finished: {} pattern(s), max size {}", stats.pattern_count, stats.max_size);

    let database_path = cli.file.display().to_string();
    Summary {
        database_path: &database_path,
        tree_count: database.len(),
        percentage: cli.percentage,
        pattern_count: stats.pattern_count,
        max_size: stats.max_size,
        elapsed_millis,
    }
    .print();

    Ok(())
}
