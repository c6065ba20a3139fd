mod md_writer;

use std::{fmt, sync::Arc};

pub use self::md_writer::MarkdownWriter;
use crate::{error::Result, sectionmap::SectionMap};

/// Builds a release title from the version and the raw (possibly empty)
/// subtitle
pub type VersionTextFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Builds the inline text for a single commit hash or issue reference
pub type LinkFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The four replaceable text generators used while rendering. Any generator
/// left as `None` falls back to the built-in default.
#[derive(Clone, Default)]
pub struct Formatters {
    /// Title for minor and major releases (Defaults to `## <version> <subtitle>`)
    pub version_text: Option<VersionTextFn>,
    /// Title for patch releases (Defaults to `### <version> <subtitle>`)
    pub patch_version_text: Option<VersionTextFn>,
    /// Receives the issue identifier
    pub issue_link: Option<LinkFn>,
    /// Receives the full commit hash
    pub commit_link: Option<LinkFn>,
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("version_text", &self.version_text.is_some())
            .field("patch_version_text", &self.patch_version_text.is_some())
            .field("issue_link", &self.issue_link.is_some())
            .field("commit_link", &self.commit_link.is_some())
            .finish()
    }
}

/// The default title for minor and major releases
pub fn version_text(version: &str, subtitle: &str) -> String {
    format!("## {version}{}", spaced(subtitle))
}

/// The default title for patch releases
pub fn patch_version_text(version: &str, subtitle: &str) -> String {
    format!("### {version}{}", spaced(subtitle))
}

fn spaced(subtitle: &str) -> String {
    if subtitle.is_empty() {
        String::new()
    } else {
        format!(" {subtitle}")
    }
}

/// A trait that allows writing the results of a changelog run. The single
/// required function `write_changelog()` accepts a `SectionMap` which can be
/// thought of as a changelog "AST" of sorts.
///
/// `clog_writer::fmt::MarkdownWriter` is the provided implementor.
pub trait FormatWriter {
    /// Writes a changelog from a given `SectionMap`
    fn write_changelog(&mut self, section_map: &SectionMap) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_titles() {
        assert_eq!(version_text("1.2.0", ""), "## 1.2.0");
        assert_eq!(version_text("1.2.0", "Halcyon"), "## 1.2.0 Halcyon");
        assert_eq!(patch_version_text("1.2.3", ""), "### 1.2.3");
        assert_eq!(patch_version_text("1.2.3", "hotfix"), "### 1.2.3 hotfix");
    }

    #[test]
    fn debug_reports_overrides() {
        let f = Formatters {
            commit_link: Some(Arc::new(|h: &str| h.to_owned())),
            ..Formatters::default()
        };
        let dbg = format!("{f:?}");
        assert!(dbg.contains("commit_link: true"));
        assert!(dbg.contains("issue_link: false"));
    }
}
