use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::table::SymbolTable;

/// Path prefixes stripped from reported source locations by default.
///
/// Stripping is cosmetic only; it makes locations shorter for humans and
/// has no bearing on symbol resolution.
pub const DEFAULT_STRIP_PREFIXES: &[&str] = &["/proc/self/cwd/", "./"];

impl SymbolTable {
    /// Parses `llvm-symbolizer` output, appending one entry per record.
    ///
    /// The input is a sequence of 3-line records: function name, source
    /// location, blank separator. Reading stops at end of stream; an
    /// incomplete trailing record is silently dropped. Each prefix of
    /// `strip_prefixes` is stripped from the start of the location, in
    /// order, before the record is stored.
    pub fn read_from_llvm_symbolizer(
        &mut self,
        input: impl BufRead,
        strip_prefixes: &[impl AsRef<str>],
    ) -> Result<()> {
        let mut lines = input.lines();

        loop {
            let Some(func) = lines.next().transpose()? else {
                break;
            };
            let Some(location) = lines.next().transpose()? else {
                break;
            };
            let Some(separator) = lines.next().transpose()? else {
                break;
            };

            if !separator.is_empty() {
                return Err(Error::MalformedRecord(separator));
            }

            let mut location = location.as_str();
            for prefix in strip_prefixes {
                location = location.strip_prefix(prefix.as_ref()).unwrap_or(location);
            }

            self.add_entry(&func, location)?;
        }

        Ok(())
    }

    /// Writes this table in the `llvm-symbolizer` output format, one 3-line
    /// record per entry, in table order.
    ///
    /// `line`/`col` are written verbatim when present; the `?` wildcard of
    /// unknown locations is not reconstructed. Re-parsing the output still
    /// yields an equal table.
    pub fn write_to_llvm_symbolizer(&self, mut output: impl Write) -> Result<()> {
        for entry in self.entries() {
            writeln!(output, "{}", entry.func)?;
            writeln!(output, "{}", entry.location())?;
            writeln!(output)?;
        }

        Ok(())
    }
}
