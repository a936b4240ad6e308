//! Ged: semantic symbol-usage finder.
//!
//! This library locates every use of a package-level symbol, optionally
//! narrowed to one of its fields or methods, using type-resolved module
//! information rather than textual search.

#![warn(missing_docs)]
// env_logger is used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod cli;
pub mod error;
pub mod pattern;
pub mod report;
pub mod resolve;
pub mod semantic;

/// Re-export common error types for convenience.
pub use error::{GedError, Result};

/// Re-export the query and report types for convenience.
pub use pattern::Pattern;
pub use report::{Match, Matches, Position};

/// Ged version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
