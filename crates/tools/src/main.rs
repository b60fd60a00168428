use catalog_tools::{run, CliArgs};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = CliArgs::parse();

    tracing::info!("Cataloging elements of {}", args.input.display());

    match run(&args) {
        Ok(report) => {
            println!("JSON output saved to: {}", report.output_path.display());
            println!("Number of tokens in JSON output: {}", report.token_count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Catalog run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
