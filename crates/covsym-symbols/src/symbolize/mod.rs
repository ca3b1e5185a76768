mod driver;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;

use crate::dso::DsoInfo;
use crate::error::{Error, Result};
use crate::llvm::DEFAULT_STRIP_PREFIXES;
use crate::table::SymbolTable;

use self::driver::DsoJob;

/// Default ceiling on concurrently running symbolizer processes.
///
/// Symbolization is I/O-bound, so a modest ceiling saturates typical
/// symbolizer latency regardless of CPU count.
pub const DEFAULT_MAX_PARALLELISM: usize = 30;

/// Batch symbolizer, resolving PC tables into source-level symbols with an
/// external `llvm-symbolizer`-compatible tool.
///
/// One symbolizer subprocess runs per DSO, with bounded parallelism. The
/// resulting [SymbolTable] always has exactly one entry per PC.
#[derive(Debug)]
pub struct Symbolizer {
    tool: PathBuf,
    scratch_dir: PathBuf,
    max_parallelism: usize,
    strip_prefixes: Vec<String>,
    scratch_ids: AtomicU64,
}

impl Symbolizer {
    /// Creates a new symbolizer invoking the given tool, with scratch files
    /// placed in `scratch_dir`.
    ///
    /// An empty tool path (or `/dev/null`) disables symbolization: every PC
    /// then resolves to the unknown sentinel.
    pub fn new(tool: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            scratch_dir: scratch_dir.into(),
            max_parallelism: DEFAULT_MAX_PARALLELISM,
            strip_prefixes: DEFAULT_STRIP_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_owned())
                .collect(),
            scratch_ids: AtomicU64::new(0),
        }
    }

    /// Sets the maximum number of concurrently running symbolizer processes.
    ///
    /// A zero limit symbolizes one DSO at a time.
    pub fn max_parallelism(mut self, limit: usize) -> Self {
        self.max_parallelism = limit;
        self
    }

    /// Replaces the path prefixes stripped from reported source locations.
    pub fn strip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Symbolizes a PC table, returning one entry per PC, in PC-table order.
    ///
    /// `dso_table` describes how the PC table splits into contiguous per-DSO
    /// ranges; its descriptors must cover the PC table exactly, in order.
    ///
    /// A DSO whose symbolizer invocation fails contributes no entries; in
    /// that case the whole table degrades to unknown entries, so its size
    /// always equals `pc_table.len()`. Partially symbolized output is never
    /// returned.
    #[tracing::instrument(
        name = "Symbolize",
        skip_all,
        fields(pcs = pc_table.len(), dsos = dso_table.len())
    )]
    pub async fn symbolize(&self, pc_table: &[u64], dso_table: &[DsoInfo]) -> Result<SymbolTable> {
        if self.tool.as_os_str().is_empty() || self.tool == Path::new("/dev/null") {
            tracing::warn!("symbolizer unspecified: debug symbols will not be used");

            let mut symbols = SymbolTable::new();
            symbols.set_all_to_unknown(pc_table.len());
            return Ok(symbols);
        }

        let jobs = self.partition(pc_table, dso_table)?;

        tracing::info!("symbolizing instrumented DSOs");

        // Symbolizing can take time, so the DSOs are resolved in parallel
        // into separate symbol tables, merged afterwards.
        let limit = dso_table.len().min(self.max_parallelism).max(1);

        let results: Vec<Result<SymbolTable>> = futures_util::stream::iter(jobs)
            .map(|job| async move { tokio::task::spawn(job.run()).await? })
            .buffered(limit)
            .collect()
            .await;

        let mut symbols = SymbolTable::with_capacity(pc_table.len());

        for result in results {
            match result {
                Ok(table) => symbols.merge_from(&table),
                Err(e) => tracing::error!(error = %e, "DSO symbolization failed"),
            }
        }

        if symbols.len() != pc_table.len() {
            tracing::warn!(
                resolved = symbols.len(),
                expected = pc_table.len(),
                "symbolization failed: debug symbols will not be used"
            );
            symbols.set_all_to_unknown(pc_table.len());
        }

        Ok(symbols)
    }

    /// Splits the PC table into one job per DSO, in DSO-table order.
    ///
    /// The DSO descriptors must cover the PC table exactly; anything else is
    /// a configuration error, not a symbolization failure.
    fn partition(&self, pc_table: &[u64], dso_table: &[DsoInfo]) -> Result<Vec<DsoJob>> {
        let mut jobs = Vec::with_capacity(dso_table.len());
        let mut pc_idx_begin = 0;

        for dso in dso_table {
            if dso.num_instrumented_pcs > pc_table.len() - pc_idx_begin {
                return Err(Error::DsoTableMismatch(
                    pc_idx_begin.saturating_add(dso.num_instrumented_pcs),
                    pc_table.len(),
                ));
            }

            let pc_idx_end = pc_idx_begin + dso.num_instrumented_pcs;

            jobs.push(DsoJob {
                scratch_id: self.scratch_ids.fetch_add(1, Ordering::Relaxed),
                dso: dso.clone(),
                pcs: pc_table[pc_idx_begin..pc_idx_end].to_vec(),
                tool: self.tool.clone(),
                scratch_dir: self.scratch_dir.clone(),
                strip_prefixes: self.strip_prefixes.clone(),
            });

            pc_idx_begin = pc_idx_end;
        }

        if pc_idx_begin != pc_table.len() {
            return Err(Error::DsoTableMismatch(pc_idx_begin, pc_table.len()));
        }

        Ok(jobs)
    }
}
