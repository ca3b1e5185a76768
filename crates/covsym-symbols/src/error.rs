/// Error type of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Standard I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Tokio task joining error.
    #[error(transparent)]
    TaskJoin(#[from] tokio::task::JoinError),

    /// File open/create error.
    #[error("{0}: {1}")]
    File(std::path::PathBuf, std::io::Error),

    /// Error when a symbolizer record separator line is not blank.
    #[error("unexpected symbolizer output format: {0:?} is not a blank separator")]
    MalformedRecord(String),

    /// Error when a source location has more than `file:line:column` parts.
    #[error("unexpected source location format: {0:?}")]
    MalformedLocation(String),

    /// Error when a line or column of a source location is not a number.
    #[error("invalid line or column in source location {0:?}")]
    InvalidLineOrColumn(String, #[source] std::num::ParseIntError),

    /// Error when the DSO table does not exactly cover the PC table.
    #[error("DSO table covers {0} PCs, but the PC table holds {1}")]
    DsoTableMismatch(usize, usize),

    /// Error when the symbolizer process exits unsuccessfully.
    #[error("{0}: symbolizer exited with {1}")]
    SymbolizerFailed(std::path::PathBuf, std::process::ExitStatus),

    /// Error when the symbolizer resolves a different number of PCs than
    /// requested.
    #[error("{0}: symbolizer resolved {2} of {1} PCs")]
    ResolvedCountMismatch(std::path::PathBuf, usize, usize),
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;
