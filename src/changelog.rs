use std::{
    fs::{self, File},
    io::{self, stdout, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use indexmap::IndexMap;
use log::debug;

use crate::{
    config::RawCfg,
    error::{Error, Result},
    fmt::{FormatWriter, Formatters, MarkdownWriter},
    git::Commits,
    link_style::LinkStyle,
    sectionmap::SectionMap,
    DEFAULT_CONFIG_FILE,
};

/// The base struct used to set options and write changelogs.
#[derive(Debug, Clone)]
pub struct Changelog {
    /// The version tag for the release
    pub version: Option<String>,
    /// The subtitle for the release
    pub subtitle: Option<String>,
    /// The repository used for the base of hyper-links
    pub repo: Option<String>,
    /// The link style to used for commit and issue hyper-links
    pub link_style: LinkStyle,
    /// Maps commit type keys to section titles, in the order the sections
    /// are written
    pub subjects: IndexMap<String, String>,
    /// Overrides for the version titles and link texts
    pub formatters: Formatters,
    /// The file to use as the old changelog data to be appended to anything
    /// new.
    pub infile: Option<String>,
    /// The file the changelog is written to (Defaults to `stdout`)
    pub outfile: Option<String>,
}

impl Default for Changelog {
    fn default() -> Self {
        debug!("Creating default changelog options");
        let mut subjects = IndexMap::new();
        subjects.insert("feat".to_owned(), "Features".to_owned());
        subjects.insert("fix".to_owned(), "Bug Fixes".to_owned());
        subjects.insert("perf".to_owned(), "Performance Improvements".to_owned());

        Changelog {
            version: None,
            subtitle: None,
            repo: None,
            link_style: LinkStyle::Github,
            subjects,
            formatters: Formatters::default(),
            infile: None,
            outfile: None,
        }
    }
}

impl Changelog {
    /// Creates the default options: no repository links and the `feat`,
    /// `fix` and `perf` sections.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new();
    /// assert_eq!(log.subjects["fix"], "Bug Fixes");
    /// ```
    pub fn new() -> Self { Changelog::default() }

    /// Creates a `Changelog` from the default `.clog.toml` configuration file
    /// inside `dir`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_writer::Changelog;
    /// let log = Changelog::with_dir("/myproject").unwrap();
    /// ```
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Changelog::from_file(dir.as_ref().join(DEFAULT_CONFIG_FILE))
    }

    /// Creates a `Changelog` from a TOML configuration file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_writer::Changelog;
    /// let log = Changelog::from_file("/myproject/clog_conf.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        debug!("Reading config file: {:?}", file);
        let toml_s =
            fs::read_to_string(file).map_err(|e| Error::ConfigRead(file.to_path_buf(), e))?;
        let cfg: RawCfg = toml::from_str(&toml_s)
            .map_err(|e| Error::ConfigParse(file.display().to_string(), e))?;
        Ok(cfg.into())
    }

    /// Creates a `Changelog` from TOML configuration text.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::from_toml_str("[clog]\nversion = \"0.3.0\"\n").unwrap();
    /// assert_eq!(log.version.as_deref(), Some("0.3.0"));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: RawCfg =
            toml::from_str(s).map_err(|e| Error::ConfigParse("<string>".to_owned(), e))?;
        Ok(cfg.into())
    }

    /// Sets the version for the release
    ///
    /// **NOTE:** Anything set here will override anything in a configuration
    /// TOML file
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().version("0.2.1");
    /// ```
    pub fn version<S: Into<String>>(mut self, v: S) -> Changelog {
        self.version = Some(v.into());
        self
    }

    /// Sets the subtitle for the release
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().subtitle("My Awesome Release Title");
    /// ```
    pub fn subtitle<S: Into<String>>(mut self, s: S) -> Changelog {
        self.subtitle = Some(s.into());
        self
    }

    /// Sets the repository used for the base of hyper-links
    ///
    /// **NOTE:** Leave off the trailing `.git`
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().repository("https://github.com/thoughtram/clog");
    /// ```
    pub fn repository<S: Into<String>>(mut self, r: S) -> Changelog {
        self.repo = Some(r.into());
        self
    }

    /// Sets the link style to use for hyper-links
    pub fn link_style(mut self, l: LinkStyle) -> Changelog {
        self.link_style = l;
        self
    }

    /// Adds (or retitles) the section for one commit type. New sections are
    /// written after the existing ones.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().subject("docs", "Documentation");
    /// assert_eq!(log.subjects.keys().last().map(String::as_str), Some("docs"));
    /// ```
    pub fn subject<K: Into<String>, T: Into<String>>(mut self, key: K, title: T) -> Changelog {
        self.subjects.insert(key.into(), title.into());
        self
    }

    /// Replaces every section with the given commit type -> title pairs
    pub fn subjects<I, K, T>(mut self, subjects: I) -> Changelog
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.subjects = subjects
            .into_iter()
            .map(|(k, t)| (k.into(), t.into()))
            .collect();
        self
    }

    /// Overrides the title of minor and major releases. The function receives
    /// the version and the raw subtitle (empty when unset).
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().version_text(|v, _| format!("# v{v}"));
    /// ```
    pub fn version_text<F>(mut self, f: F) -> Changelog
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.formatters.version_text = Some(Arc::new(f));
        self
    }

    /// Overrides the title of patch releases
    pub fn patch_version_text<F>(mut self, f: F) -> Changelog
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.formatters.patch_version_text = Some(Arc::new(f));
        self
    }

    /// Overrides the text written for each closed issue
    pub fn issue_link<F>(mut self, f: F) -> Changelog
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.formatters.issue_link = Some(Arc::new(f));
        self
    }

    /// Overrides the text written for each commit hash; the function
    /// receives the full hash.
    pub fn commit_link<F>(mut self, f: F) -> Changelog
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.formatters.commit_link = Some(Arc::new(f));
        self
    }

    /// Sets the changelog file to output or prepend to (Defaults to `stdout` if
    /// omitted)
    pub fn changelog<S: Into<String> + Clone>(mut self, c: S) -> Changelog {
        self.infile = Some(c.clone().into());
        self.outfile = Some(c.into());
        self
    }

    /// Sets the changelog output file, useful in conjunction with
    /// `Changelog::infile()` to read the previous changelog from one place and
    /// write to another.
    pub fn outfile<S: Into<String>>(mut self, c: S) -> Changelog {
        self.outfile = Some(c.into());
        self
    }

    /// Sets the file holding the previous changelog, which is appended after
    /// the new release.
    pub fn infile<S: Into<String>>(mut self, c: S) -> Changelog {
        self.infile = Some(c.into());
        self
    }

    /// Renders a changelog for `commits` and returns the whole document.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::{git::Commit, Changelog};
    /// let log = Changelog::new().version("1.0.0");
    /// let text = log
    ///     .write_log(vec![Commit::new("fix", "stop leaking", "0123456789")])
    ///     .unwrap();
    ///
    /// assert!(text.starts_with("<a name=\"1.0.0\"></a>\n## 1.0.0 ("));
    /// assert!(text.ends_with("#### Bug Fixes\n\n* stop leaking (01234567)\n\n"));
    /// ```
    pub fn write_log(&self, commits: Commits) -> Result<String> {
        let mut buf = Vec::with_capacity(256);
        self.write_log_with(commits, &mut buf)?;
        String::from_utf8(buf).map_err(Into::into)
    }

    /// Renders a changelog for `commits` into any `std::io::Write` sink
    pub fn write_log_with<W: io::Write>(&self, commits: Commits, out: &mut W) -> Result<()> {
        debug!("Writing changelog for {} commits", commits.len());
        let sm = SectionMap::from_commits(commits, self.subjects.keys().cloned());

        let mut writer = MarkdownWriter::new(out, self);
        writer.write_changelog(&sm)
    }

    /// Writes the changelog using whatever options have been specified thus
    /// far: to `outfile` when set, otherwise to `stdout` followed by the
    /// contents of `infile` (if any).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().version("0.4.0");
    /// log.write_changelog(vec![]).unwrap();
    /// ```
    pub fn write_changelog(&self, commits: Commits) -> Result<()> {
        if let Some(ref cl) = self.outfile {
            debug!("outfile set to: {:?}", cl);
            return self.write_changelog_to(cl, commits);
        }

        debug!("outfile not set using stdout");
        let previous = match self.infile {
            Some(ref infile) => read_previous(infile)?,
            None => String::new(),
        };
        let out = stdout();
        let mut out_buf = BufWriter::new(out.lock());
        self.write_log_with(commits, &mut out_buf)?;
        out_buf.write_all(previous.as_bytes())?;
        out_buf.flush().map_err(Into::into)
    }

    /// Writes the changelog to a specified file, and prepends the new release
    /// to the previous changelog (read from `infile`, or the file itself),
    /// creating the file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_writer::Changelog;
    /// let log = Changelog::new().version("0.4.0");
    /// log.write_changelog_to("/myproject/CHANGELOG.md", vec![]).unwrap();
    /// ```
    pub fn write_changelog_to<P: AsRef<Path>>(&self, cl: P, commits: Commits) -> Result<()> {
        debug!("Writing changelog to file: {:?}", cl.as_ref());
        let previous = match self.infile {
            Some(ref infile) => read_previous(infile)?,
            None => read_previous(cl.as_ref())?,
        };

        let mut file = BufWriter::new(File::create(cl.as_ref())?);
        self.write_log_with(commits, &mut file)?;
        file.write_all(previous.as_bytes())?;
        file.flush().map_err(Into::into)
    }
}

// A missing previous changelog just means this is the first release
fn read_previous<P: AsRef<Path>>(path: P) -> Result<String> {
    match fs::read_to_string(path.as_ref()) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No previous changelog at {:?}", path.as_ref());
            Ok(String::new())
        }
        Err(e) => Err(e.into()),
    }
}

impl From<RawCfg> for Changelog {
    fn from(cfg: RawCfg) -> Self {
        let mut log = Changelog::default();
        let clog = cfg.clog;

        log.version = clog.version;
        log.subtitle = clog.subtitle;
        log.repo = clog.repository;
        log.link_style = clog.link_style;
        log.infile = clog.infile;
        log.outfile = clog.outfile;
        if let Some(cl) = clog.changelog {
            log.infile = Some(cl.clone());
            log.outfile = Some(cl);
        }
        if !cfg.subjects.is_empty() {
            log.subjects = cfg.subjects;
        }

        debug!("Returning changelog options:\n{:?}", log);
        log
    }
}
