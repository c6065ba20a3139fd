//! Renders conventional commits, already parsed into type, component,
//! subject, closed issues and breaking notes, into the Markdown changelog for
//! a single release.
//!
//! # Example
//!
//! ```
//! use clog_writer::{git::Commit, Changelog};
//!
//! let log = Changelog::new()
//!     .version("1.2.0")
//!     .repository("https://github.com/clog-tool/clog-writer");
//!
//! let text = log
//!     .write_log(vec![
//!         Commit::new("feat", "add widgets", "0123456789abcdef").component("ui"),
//!         Commit::new("fix", "stop panicking", "fedcba9876543210").closes([12]),
//!     ])
//!     .unwrap();
//!
//! assert!(text.contains("#### Features\n\n* **ui:** add widgets"));
//! ```

mod changelog;
mod config;
pub mod error;
pub mod fmt;
pub mod git;
mod link_style;
mod sectionmap;

pub use changelog::Changelog;
pub use link_style::LinkStyle;
pub use sectionmap::{ComponentMap, SectionMap};

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".clog.toml";
