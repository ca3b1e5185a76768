use std::path::PathBuf;

/// The covsym batch symbolizer.
#[derive(clap::Parser)]
pub struct CliOpts {
    /// The command to run.
    #[clap(subcommand)]
    pub action: CliAction,
}

/// The command to run.
#[derive(clap::Subcommand)]
pub enum CliAction {
    /// Command to symbolize a PC table with an external symbolizer.
    Symbolize {
        /// Symbolization configuration (KDL format).
        ///
        /// If it ends with `.kdl`, it is treated as a path to a
        /// configuration file for the symbolization. Otherwise it is
        /// directly parsed as inline KDL-formatted configuration.
        #[clap(short, long, value_name = "CONTENT/PATH")]
        config: String,

        /// Path to the optional destination of the symbol table.
        ///
        /// The table is printed on the standard output when omitted.
        #[clap(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Path to the PC table to symbolize (one hexadecimal address per
        /// line).
        pcs: PathBuf,
    },

    /// Command to dump a stored symbol table in readable form.
    Dump {
        /// Path to the optional destination of the dump.
        ///
        /// The dump is printed on the standard output when omitted.
        #[clap(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Path to the symbol table file to dump.
        input: PathBuf,
    },
}

impl CliOpts {
    /// Parses the CLI from the command-line.
    ///
    /// # Warning
    ///
    /// Exits on error.
    pub fn parse_from_cmdline() -> Self {
        <Self as clap::Parser>::parse()
    }
}
