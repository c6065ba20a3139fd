use std::io;

use log::debug;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    changelog::Changelog,
    error::Result,
    fmt::{self, FormatWriter},
    git::Commit,
    sectionmap::{ComponentMap, SectionMap},
};

const BREAKING_TITLE: &str = "Breaking Changes";

/// Wraps a `std::io::Write` object to write changelog output in a Markdown
/// format.
///
/// The writer is driven with `header()`, then `section()` once per section,
/// then `end()`. `FormatWriter::write_changelog()` performs that whole
/// sequence for a `SectionMap`.
///
/// # Example
///
/// ```
/// # use clog_writer::{git::Commit, Changelog, SectionMap, fmt::MarkdownWriter};
/// let log = Changelog::new().version("1.0.0");
/// let sm = SectionMap::from_commits(
///     vec![Commit::new("feat", "first light", "0123456789abcdef")],
///     log.subjects.keys().cloned(),
/// );
///
/// let mut out = Vec::new();
/// let mut writer = MarkdownWriter::new(&mut out, &log);
/// writer.header("1.0.0").unwrap();
/// writer.section("Features", &sm.sections["feat"]).unwrap();
/// writer.end().unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("* first light (01234567)\n"));
/// ```
pub struct MarkdownWriter<'a> {
    out: &'a mut dyn io::Write,
    options: &'a Changelog,
}

impl<'a> MarkdownWriter<'a> {
    /// Creates a new instance of the `MarkdownWriter` struct using a
    /// `std::io::Write` object and the options to render with.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::io::BufWriter;
    /// # use clog_writer::{Changelog, fmt::MarkdownWriter};
    /// let log = Changelog::new();
    ///
    /// // Create a MarkdownWriter to wrap stdout
    /// let out = std::io::stdout();
    /// let mut out_buf = BufWriter::new(out.lock());
    /// let mut writer = MarkdownWriter::new(&mut out_buf, &log);
    /// ```
    pub fn new<T: io::Write + 'a>(writer: &'a mut T, options: &'a Changelog) -> MarkdownWriter<'a> {
        MarkdownWriter {
            out: writer,
            options,
        }
    }

    /// Writes the release header stamped with the current time
    pub fn header(&mut self, version: &str) -> Result<()> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.header_at(version, now)
    }

    /// Writes the release header stamped with the given time.
    ///
    /// A version whose third dot-separated part is `0` is a minor or major
    /// release, anything else is treated as a patch release.
    pub fn header_at(&mut self, version: &str, now: OffsetDateTime) -> Result<()> {
        let subtitle = self.options.subtitle.as_deref().unwrap_or_default();
        let minor = version.split('.').nth(2) == Some("0");
        let formatters = &self.options.formatters;

        let version_text = if minor {
            match formatters.version_text {
                Some(ref f) => f(version, subtitle),
                None => fmt::version_text(version, subtitle),
            }
        } else {
            match formatters.patch_version_text {
                Some(ref f) => f(version, subtitle),
                None => fmt::patch_version_text(version, subtitle),
            }
        };

        let date = now.format(format_description!(
            "[year]-[month]-[day] [hour padding:none]:[minute padding:none]:[second padding:none]"
        ))?;
        debug!("Writing header for {version} ({date})");
        write!(
            self.out,
            "<a name=\"{version}\"></a>\n{version_text} ({date})\n\n"
        )
        .map_err(Into::into)
    }

    /// Writes a particular section of a changelog. Sections without any
    /// components are skipped entirely.
    pub fn section(&mut self, title: &str, section: &ComponentMap) -> Result<()> {
        if section.is_empty() {
            debug!("Skipping empty section: {title}");
            return Ok(());
        }
        debug!("Writing section: {title}");

        write!(self.out, "#### {title}\n\n")?;

        for (component, entries) in section.iter() {
            let prefix = match component {
                Some(name) if entries.len() > 1 => {
                    writeln!(self.out, "* **{name}:**")?;
                    "  *".to_owned()
                }
                Some(name) => format!("* **{name}:**"),
                None => "*".to_owned(),
            };

            for entry in entries.iter() {
                self.write_entry(&prefix, entry)?;
            }
        }

        writeln!(self.out).map_err(Into::into)
    }

    /// Signals that nothing more will be written and flushes the sink
    pub fn end(&mut self) -> Result<()> {
        self.out.flush().map_err(Into::into)
    }

    fn write_entry(&mut self, prefix: &str, entry: &Commit) -> Result<()> {
        write!(
            self.out,
            "{prefix} {} ({}",
            entry.subject,
            self.commit_link(entry)
        )?;

        if !entry.closes.is_empty() {
            let closes_string = entry
                .closes
                .iter()
                .map(|issue| self.issue_link(issue))
                .collect::<Vec<String>>()
                .join(", ");

            write!(self.out, ", closes {closes_string}")?;
        }

        writeln!(self.out, ")").map_err(Into::into)
    }

    fn repo(&self) -> Option<&str> {
        self.options.repo.as_deref().filter(|r| !r.is_empty())
    }

    fn commit_link(&self, entry: &Commit) -> String {
        if let Some(ref f) = self.options.formatters.commit_link {
            return f(&entry.hash);
        }
        match self.repo() {
            Some(repo) => format!(
                "[{}]({})",
                entry.short_hash(),
                self.options.link_style.commit_link(&entry.hash, repo)
            ),
            None => entry.short_hash().to_owned(),
        }
    }

    fn issue_link(&self, issue: &str) -> String {
        if let Some(ref f) = self.options.formatters.issue_link {
            return f(issue);
        }
        match self
            .repo()
            .and_then(|repo| self.options.link_style.issue_link(issue, repo))
        {
            Some(url) => format!("[#{issue}]({url})"),
            None => format!("(#{issue})"),
        }
    }
}

impl<'a> FormatWriter for MarkdownWriter<'a> {
    fn write_changelog(&mut self, sm: &SectionMap) -> Result<()> {
        let options = self.options;
        self.header(options.version.as_deref().unwrap_or_default())?;

        // Sections are written in the order the subjects were configured
        for (key, title) in options.subjects.iter() {
            if let Some(comp_map) = sm.sections.get(key) {
                self.section(title, comp_map)?;
            }
        }
        self.section(BREAKING_TITLE, &sm.breaks)?;

        self.end()
    }
}
