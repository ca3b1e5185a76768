//! Crate implementing the CLI commands.

mod cli;
mod config;
mod dump;
mod symbolize;

pub use self::cli::{CliAction, CliOpts};
pub use self::config::{DsoConfig, StripPrefix, SymbolizeConfig};
pub use self::dump::evaluate_dump;
pub use self::symbolize::evaluate_symbolize;
