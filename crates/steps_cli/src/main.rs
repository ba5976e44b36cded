mod config;
mod output;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use config::ReportConfig;
use output::print_records;
use std::io::Read;
use std::path::PathBuf;
use steps_engine::solve;
use tracing_subscriber::EnvFilter;

/// Step-by-step math problem solver.
#[derive(Parser, Debug)]
#[command(name = "stepsolve", version, about)]
struct Args {
    /// Problem text to solve; omit to read a file, stdin, or start the REPL
    problem: Option<String>,

    /// Read problems from a file
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Read problems from stdin
    #[arg(long)]
    stdin: bool,

    /// Render the report as Markdown
    #[arg(long)]
    markdown: bool,

    /// Emit records as JSON
    #[arg(long)]
    json: bool,

    /// Hide the step-by-step traces
    #[arg(long)]
    no_steps: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ReportConfig::load();
    if args.markdown {
        config.markdown = true;
    }
    if args.json {
        config.json = true;
    }
    if args.no_steps {
        config.show_steps = false;
    }

    let input = if let Some(problem) = args.problem {
        Some(problem)
    } else if let Some(path) = args.file {
        Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?,
        )
    } else if args.stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Some(buf)
    } else {
        None
    };

    match input {
        Some(text) => {
            let records = solve(&text);
            print_records(&records, &config)
        }
        None => repl::run(config),
    }
}
