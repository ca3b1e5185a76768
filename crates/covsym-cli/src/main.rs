#![allow(missing_docs)]
#![allow(clippy::print_stderr)]

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use covsym_cli::{CliAction, CliOpts};

use miette::IntoDiagnostic;

use tracing_subscriber::EnvFilter;

fn main() {
    let cli = CliOpts::parse_from_cmdline();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_env_var("COVSYM_LOG")
                .from_env_lossy(),
        )
        .init();

    let res = match cli.action {
        CliAction::Symbolize {
            config,
            output,
            pcs,
        } => covsym_cli::evaluate_symbolize(config, pcs, output),
        CliAction::Dump { output, input } => evaluate_dump(input, output),
    };

    if let Err(e) = res {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn evaluate_dump(input: PathBuf, output: Option<PathBuf>) -> miette::Result<()> {
    let table = File::open(input).map(BufReader::new).into_diagnostic()?;

    if let Some(output) = output {
        let file = File::create(output).into_diagnostic()?;
        covsym_cli::evaluate_dump(table, file)
    } else {
        covsym_cli::evaluate_dump(table, std::io::stdout())
    }
}
