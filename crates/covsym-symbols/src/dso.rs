use std::path::PathBuf;

/// Shared binary (DSO) contributing a contiguous block of instrumented PCs
/// to a PC table.
#[derive(Clone, Debug)]
pub struct DsoInfo {
    /// Path of the shared binary.
    pub path: PathBuf,

    /// Number of instrumented PCs contributed by this binary.
    pub num_instrumented_pcs: usize,
}

impl DsoInfo {
    /// Creates a new DSO descriptor.
    pub fn new(path: impl Into<PathBuf>, num_instrumented_pcs: usize) -> Self {
        Self {
            path: path.into(),
            num_instrumented_pcs,
        }
    }
}
