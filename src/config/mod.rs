//! Configuration for the analyzer.
//!
//! Settings come from a `.cqs-analyzer.toml` file discovered in the working
//! directory or one of its ancestors, or from an explicitly named file.

mod core;
mod loader;
mod rules;

pub use core::{CqsConfig, ReportConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
pub use rules::RuleSettings;

/// Default configuration written by `cqs-analyzer init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# cqs-analyzer configuration

[rules]
# Non-void units with observable parameters
ambiguous_shape = true
# Assignments to fields, properties and other non-local state
illegal_write = true
# Discarded calls into void methods or lambdas
suspicious_delegated_call = true

[report]
# Lowest severity to print: "info" or "error"
min_severity = "info"
"#;
