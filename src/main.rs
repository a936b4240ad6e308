//! Ged CLI binary
//!
//! This is the main entry point for the ged command-line interface.
//! The CLI is a thin adapter over existing APIs - NO logic is implemented here.

use ged::cli::{CliErrorPayload, CliSuccessPayload};
use ged::{GedError, Matches};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = ged::cli::parse_args();

    // Initialize logger if verbose
    if cli.verbose {
        env_logger::init();
    }

    match execute_search(&cli.pattern, &cli.modules) {
        Ok(matches) => {
            if cli.json {
                print_json(&CliSuccessPayload::from_matches(&matches));
            } else {
                print!("{}", matches);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                print_json(&CliErrorPayload::from_error(&e));
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(1)
        }
    }
}

/// Execute the search.
///
/// This function is a thin adapter that:
/// 1. Compiles the pattern
/// 2. Loads the modules' semantic dumps
/// 3. Resolves occurrences in every module
fn execute_search(pattern: &str, modules: &[String]) -> Result<Matches, GedError> {
    use ged::resolve::find_usages;
    use ged::semantic::DumpLoader;
    use ged::Pattern;

    let pattern = Pattern::parse(pattern)?;
    let loader = DumpLoader::current_dir();
    find_usages(&pattern, &loader, modules)
}

fn print_json<T: serde::Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}
