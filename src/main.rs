mod audit;
mod check;
mod classify;
mod cli;
mod config;
mod render;
mod rule;
mod types;
mod util;

use audit::Auditor;
use clap::Parser;
use cli::Cli;
use config::Config;
use std::path::Path;
use tracing::{debug, error, info};

const EXIT_FAILURE: i32 = 1;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = Config::load_or_default(Path::new(&cli.config))?;
    let auditor = Auditor::from_config(&config)?;

    let source = cli.source();
    debug!("File source: {:?}", source);
    let files = source.list(auditor.classifier());
    info!("Found {} candidate files", files.len());

    let result = auditor.audit(&files, cli.commit_msg.as_deref());
    println!("{}", render::format_report(&result));

    if let Some(output) = &cli.output {
        render::write_output(output, &result)?;
    }

    Ok(result.exit_code())
}

/// Log to stderr so stdout carries only the report
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
