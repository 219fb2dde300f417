use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use urlinspect::logging;
use urlinspect::msglog::Discussion;

/// Print an exported chat log, newest message first.
#[derive(Debug, Parser)]
#[command(name = "msglog", version, about)]
struct Cli {
    /// JSON file holding an array of message records
    file: PathBuf,
}

fn main() {
    if let Err(err) = logging::init_logging() {
        eprintln!("msglog: {:#}", err);
    }

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        if is_broken_pipe(&err) {
            return;
        }
        eprintln!("msglog error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", cli.file.display())?;

    let discussion = Discussion::open(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    for message in discussion.newest_first() {
        writeln!(out, "{}", message)?;
    }
    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .map_or(false, |e| e.kind() == io::ErrorKind::BrokenPipe)
}
