use std::path::PathBuf;

use crate::dso::DsoInfo;
use crate::error::{Error, Result};
use crate::table::SymbolTable;

/// Symbolization work for the PCs of a single DSO.
pub(super) struct DsoJob {
    /// Identifier making this job's scratch file names unique.
    pub scratch_id: u64,

    /// The DSO whose PCs are symbolized.
    pub dso: DsoInfo,

    /// PCs belonging to this DSO, in PC-table order.
    pub pcs: Vec<u64>,

    /// Path of the external symbolizer executable.
    pub tool: PathBuf,

    /// Directory receiving the scratch files.
    pub scratch_dir: PathBuf,

    /// Path prefixes stripped from reported source locations.
    pub strip_prefixes: Vec<String>,
}

impl DsoJob {
    /// Symbolizes this job's PCs, returning one table entry per PC, in the
    /// order the PCs were given.
    ///
    /// The symbolizer runs as a subprocess, reading one hexadecimal address
    /// per line from a scratch file and writing its records to another.
    /// Both scratch files are removed when the job completes.
    #[tracing::instrument(name = "SymbolizeDso", skip_all, fields(dso = %self.dso.path.display()))]
    pub(super) async fn run(self) -> Result<SymbolTable> {
        let dso_basename = self
            .dso
            .path
            .file_name()
            .unwrap_or(self.dso.path.as_os_str())
            .to_string_lossy();

        let pcs_file = tempfile::Builder::new()
            .prefix(&format!("{dso_basename}.pcs.{}.", self.scratch_id))
            .tempfile_in(&self.scratch_dir)
            .map_err(|e| Error::File(self.scratch_dir.clone(), e))?;

        let symbols_file = tempfile::Builder::new()
            .prefix(&format!("{dso_basename}.symbols.{}.", self.scratch_id))
            .tempfile_in(&self.scratch_dir)
            .map_err(|e| Error::File(self.scratch_dir.clone(), e))?;

        let pcs_lines: String = self.pcs.iter().map(|pc| format!("{pc:#x}\n")).collect();

        tokio::fs::write(pcs_file.path(), pcs_lines).await?;

        tracing::info!(pcs = self.pcs.len(), "symbolizing");

        let stdin = pcs_file
            .reopen()
            .map_err(|e| Error::File(pcs_file.path().to_owned(), e))?;
        let stdout = symbols_file
            .reopen()
            .map_err(|e| Error::File(symbols_file.path().to_owned(), e))?;

        let status = tokio::process::Command::new(&self.tool)
            .arg("--no-inlines")
            .arg("-e")
            .arg(&self.dso.path)
            .stdin(stdin)
            .stdout(stdout)
            .status()
            .await?;

        if !status.success() {
            return Err(Error::SymbolizerFailed(self.dso.path, status));
        }

        let output = tokio::fs::read_to_string(symbols_file.path())
            .await
            .map_err(|e| Error::File(symbols_file.path().to_owned(), e))?;

        let mut symbols = SymbolTable::with_capacity(self.pcs.len());
        symbols.read_from_llvm_symbolizer(output.as_bytes(), &self.strip_prefixes)?;

        if symbols.len() != self.pcs.len() {
            return Err(Error::ResolvedCountMismatch(
                self.dso.path,
                self.pcs.len(),
                symbols.len(),
            ));
        }

        Ok(symbols)
    }
}
