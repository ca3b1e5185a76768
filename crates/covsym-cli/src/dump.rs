use std::io::{BufRead, Write};

use covsym_symbols::{DEFAULT_STRIP_PREFIXES, SymbolTable};
use miette::IntoDiagnostic;

/// Runs the subcommand for dumping a symbol table in human-readable
/// form.
///
/// The input may be a table previously written by `symbolize`, or raw
/// `llvm-symbolizer` output. Entries are printed one per line, prefixed
/// with their PC index.
pub fn evaluate_dump(input: impl BufRead, mut output: impl Write) -> miette::Result<()> {
    let mut table = SymbolTable::new();

    table
        .read_from_llvm_symbolizer(input, DEFAULT_STRIP_PREFIXES)
        .into_diagnostic()?;

    for (index, symbol) in table.entries().enumerate() {
        writeln!(output, "{index}: {}", symbol.full_description()).into_diagnostic()?;
    }

    Ok(())
}
