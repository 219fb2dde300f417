use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use urlinspect::{decode_query, logging, parse, render};

/// Print a URL's components and its decoded query string.
#[derive(Debug, Parser)]
#[command(name = "urlinspect", version, about)]
struct Cli {
    /// The URL to inspect
    url: String,
}

fn main() {
    if let Err(err) = logging::init_logging() {
        eprintln!("urlinspect: {:#}", err);
    }

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        if is_broken_pipe(&err) {
            return;
        }
        eprintln!("urlinspect error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let parsed = parse(&cli.url);
    let query = decode_query(&parsed.query);
    tracing::debug!(keys = query.len(), "decoded query");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", parsed)?;
    render(&parsed, &query).write_to(&mut out)?;
    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .map_or(false, |e| e.kind() == io::ErrorKind::BrokenPipe)
}
