/// Configuration of batch symbolization.
#[derive(Debug, PartialEq, knus::Decode)]
pub struct SymbolizeConfig {
    /// Path of the external symbolizer executable.
    ///
    /// An empty path (or `/dev/null`) disables symbolization: every PC then
    /// resolves to the unknown sentinel.
    #[knus(child, default = "llvm-symbolizer".into(), unwrap(argument))]
    pub symbolizer: String,

    /// Directory receiving the symbolizer scratch files.
    ///
    /// Defaults to the system temporary directory.
    #[knus(child, unwrap(argument))]
    pub scratch_dir: Option<String>,

    /// Maximum number of concurrently running symbolizer processes.
    #[knus(child, default = covsym_symbols::DEFAULT_MAX_PARALLELISM, unwrap(argument))]
    pub parallelism: usize,

    /// Path prefixes stripped from reported source locations.
    ///
    /// The well-known noisy prefixes are stripped when no node is given.
    #[knus(children(name = "strip-prefix"))]
    pub strip_prefixes: Vec<StripPrefix>,

    /// Instrumented DSOs, in PC-table order.
    #[knus(children(name = "dso"))]
    pub dsos: Vec<DsoConfig>,
}

/// Configuration of a path prefix stripped from source locations.
#[derive(Debug, PartialEq, knus::Decode)]
pub struct StripPrefix {
    /// The prefix to strip.
    #[knus(argument)]
    pub prefix: String,
}

/// Configuration of one instrumented DSO.
#[derive(Debug, PartialEq, knus::Decode)]
pub struct DsoConfig {
    /// Path of the shared binary.
    #[knus(argument)]
    pub path: String,

    /// Number of instrumented PCs contributed by this binary.
    #[knus(property)]
    pub pcs: usize,
}
