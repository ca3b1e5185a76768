use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use covsym_symbols::{DsoInfo, Symbolizer};
use miette::IntoDiagnostic;

use crate::SymbolizeConfig;

/// Runs the subcommand for symbolizing a PC table.
pub fn evaluate_symbolize(
    config: String,
    pcs: PathBuf,
    output: Option<PathBuf>,
) -> miette::Result<()> {
    let config = parse_symbolize_config(config)?;

    let pc_table = std::fs::read_to_string(&pcs)
        .into_diagnostic()
        .and_then(|content| parse_pc_table(&content))?;

    let dso_table: Vec<DsoInfo> = config
        .dsos
        .iter()
        .map(|dso| DsoInfo::new(&dso.path, dso.pcs))
        .collect();

    let scratch_dir = config
        .scratch_dir
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let mut symbolizer =
        Symbolizer::new(config.symbolizer, scratch_dir).max_parallelism(config.parallelism);

    if !config.strip_prefixes.is_empty() {
        symbolizer =
            symbolizer.strip_prefixes(config.strip_prefixes.into_iter().map(|strip| strip.prefix));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    let symbols = runtime
        .block_on(symbolizer.symbolize(&pc_table, &dso_table))
        .into_diagnostic()?;

    if let Some(output) = output {
        let file = File::create(&output).into_diagnostic()?;
        symbols.write_to_llvm_symbolizer(file).into_diagnostic()
    } else {
        symbols
            .write_to_llvm_symbolizer(std::io::stdout())
            .into_diagnostic()
    }
}

fn parse_symbolize_config(config: String) -> miette::Result<SymbolizeConfig> {
    let path = Path::new(&config);

    let config = if let Some((filename, "kdl")) = path
        .file_name()
        .and_then(OsStr::to_str)
        .zip(path.extension().and_then(OsStr::to_str))
    {
        let content = std::fs::read_to_string(path).into_diagnostic()?;
        knus::parse(filename, &content)?
    } else {
        knus::parse("<content>", &config)?
    };

    Ok(config)
}

fn parse_pc_table(content: &str) -> miette::Result<Vec<u64>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let digits = line
                .strip_prefix("0x")
                .or_else(|| line.strip_prefix("0X"))
                .unwrap_or(line);

            u64::from_str_radix(digits, 16).map_err(|e| miette::miette!("invalid PC {line:?}: {e}"))
        })
        .collect()
}
