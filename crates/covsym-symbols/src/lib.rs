//! This crate resolves instrumented program counters (PCs), as collected by
//! a coverage-guided fuzzing engine, into source-level symbols (function,
//! file, line, column).
//!
//! Resolution is delegated to an external `llvm-symbolizer`-compatible tool,
//! invoked as one subprocess per DSO with bounded parallelism. The resulting
//! [SymbolTable] always has exactly one entry per PC, in PC-table order, so
//! crash and coverage reports can look symbols up positionally; PCs that
//! cannot be resolved come back as the `"?"` sentinel.
//!
//! No binary debug format is parsed here: the only exchange with the
//! symbolizer is its line-oriented text output, which [SymbolTable] can also
//! serialize back for storage.
//!
//! # Example
//!
//! ```no_run
//! use covsym_symbols::{DsoInfo, Symbolizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let symbolizer = Symbolizer::new("/usr/bin/llvm-symbolizer", "/tmp");
//!
//!     // PCs of two instrumented binaries, in DSO order.
//!     let pc_table = [0x401000_u64, 0x401010, 0x7f102000];
//!     let dso_table = [
//!         DsoInfo::new("/bin/target", 2),
//!         DsoInfo::new("/lib/helper.so", 1),
//!     ];
//!
//!     let symbols = symbolizer
//!         .symbolize(&pc_table, &dso_table)
//!         .await
//!         .unwrap();
//!
//!     for (pc, symbol) in pc_table.iter().zip(symbols.entries()) {
//!         println!("{pc:#x} {}", symbol.full_description());
//!     }
//! }
//! ```

mod dso;
mod error;
mod interner;
mod llvm;
mod symbolize;
mod table;

pub use self::dso::DsoInfo;
pub use self::error::{Error, Result};
pub use self::interner::{StringInterner, Sym};
pub use self::llvm::DEFAULT_STRIP_PREFIXES;
pub use self::symbolize::{DEFAULT_MAX_PARALLELISM, Symbolizer};
pub use self::table::{SymbolRef, SymbolTable};
