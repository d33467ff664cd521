//! Front-end configuration

use std::path::PathBuf;

use clap::ValueEnum;

/// Version string stamped on every loaded model
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default file name for diff output
pub const DEFAULT_DIFF_OUTPUT: &str = "diff.xml";

/// How the document grammar check reacts to violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaMode {
    /// Skip the grammar check
    Off,
    /// Log every violation and keep loading
    #[default]
    Warn,
    /// Fail loading on any violation
    Strict,
}

/// Serialization format of a diff script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiffFormat {
    #[default]
    Xml,
    Json,
}

/// Options for the document loader
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub schema: SchemaMode,
    pub tool_version: String,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self {
            schema: SchemaMode::default(),
            tool_version: TOOL_VERSION.to_string(),
        }
    }

    pub fn with_schema(mut self, schema: SchemaMode) -> Self {
        self.schema = schema;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub load: LoadOptions,
    pub diff_output: PathBuf,
    pub diff_format: DiffFormat,
}

impl Config {
    pub fn new() -> Self {
        Self {
            load: LoadOptions::new(),
            diff_output: PathBuf::from(DEFAULT_DIFF_OUTPUT),
            diff_format: DiffFormat::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
