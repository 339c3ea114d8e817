// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the report)
// 3. Run the validator and render the report
// 4. Exit with proper code (0 = all valid, 1 = broken links, 2 = bad invocation)
// =============================================================================

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use doc_link_guardian::cli::Cli;
use doc_link_guardian::report::render_and_exit_code;
use doc_link_guardian::{
    JsonReporter, LinkValidator, Reporter, TerminalReporter, ValidatorConfig, EXIT_USAGE,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();
    init_tracing(&cli);

    // Run our application logic and capture the exit code
    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {e:#}");
            EXIT_USAGE
        }
    };

    std::process::exit(exit_code);
}

// Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<i32> {
    let config = ValidatorConfig::from(cli);
    debug!(?config, path = %cli.path.display(), "starting validation");

    let mut reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonReporter::new(std::io::stdout()))
    } else {
        Box::new(TerminalReporter::stdout())
    };

    // The path check happens here, before any file is read
    let validator = match LinkValidator::new(&cli.path, config) {
        Ok(validator) => validator,
        Err(e) if e.is_usage() => {
            reporter.error(&e.to_string());
            return Ok(EXIT_USAGE);
        }
        Err(e) => return Err(e.into()),
    };
    debug!(docs_root = %validator.tree().docs_root().display(), "documentation root");

    let report = validator.run(reporter.as_mut()).await;
    Ok(render_and_exit_code(reporter.as_mut(), &report))
}
