//! Line-oriented run configuration for edgewalk.
//!
//! A configuration lists one `x,y` vertex coordinate per line, in order, and
//! may override the run parameters with `T=`, `r=` and `iterations=` lines.
//! Blank lines and lines starting with `#` are skipped.

mod errors;
mod loader;

pub use errors::{ConfigError, ConfigErrorCode, MalformedLine};
pub use loader::{DEFAULT_EDGE_COST, DEFAULT_TEMPERATURE, RunConfig};
