use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

/// Determines the hyperlink style used in commit and issue links. Defaults to
/// `LinkStyle::Github`
///
/// # Example
///
/// ```
/// # use clog_writer::{Changelog, LinkStyle};
/// let log = Changelog::new().link_style(LinkStyle::Stash);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum LinkStyle {
    #[default]
    Github,
    Gitlab,
    Stash,
    Cgit,
    Gitweb,
}

impl<'de> serde::de::Deserialize<'de> for LinkStyle {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl LinkStyle {
    /// Gets a hyperlink url to an issue in the specified format, or `None`
    /// when the hosting style has no issue tracker.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let issue = link.issue_link("141", "https://github.com/thoughtram/clog");
    ///
    /// assert_eq!(Some("https://github.com/thoughtram/clog/issues/141".to_owned()), issue);
    /// ```
    pub fn issue_link(&self, issue: &str, repo: &str) -> Option<String> {
        match *self {
            LinkStyle::Github | LinkStyle::Gitlab => Some(format!("{repo}/issues/{issue}")),
            // stash, cgit and gitweb have no issue tracker to link to
            LinkStyle::Stash | LinkStyle::Cgit | LinkStyle::Gitweb => None,
        }
    }

    /// Gets a hyperlink url to a commit in the specified format.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let commit = link.commit_link("123abc891234567890abcdefabc4567898724", "https://github.com/thoughtram/clog");
    ///
    /// assert_eq!("https://github.com/thoughtram/clog/commit/123abc891234567890abcdefabc4567898724", commit);
    /// ```
    ///
    /// # Example
    /// Note that for `LinkStyle::Gitweb` the actual repository name has to be
    /// given as part of the parameter string of the URL:
    ///
    /// ```
    /// # use clog_writer::LinkStyle;
    /// let link = LinkStyle::Gitweb;
    /// let commit = link.commit_link("deadbeef", "http://example.com/gitweb/?p=foo.git");
    ///
    /// assert_eq!("http://example.com/gitweb/?p=foo.git;a=commit;h=deadbeef", commit);
    /// ```
    pub fn commit_link(&self, hash: &str, repo: &str) -> String {
        match *self {
            LinkStyle::Github | LinkStyle::Gitlab => format!("{repo}/commit/{hash}"),
            LinkStyle::Stash => format!("{repo}/commits/{hash}"),
            LinkStyle::Cgit => format!("{repo}/commit/?id={hash}"),
            LinkStyle::Gitweb => format!("{repo};a=commit;h={hash}"),
        }
    }
}
