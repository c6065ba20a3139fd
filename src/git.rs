/// The struct representation of a `Commit` as handed over by a commit parser
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    /// The full hash
    pub hash: String,
    /// The commit subject
    pub subject: String,
    /// The component (if any)
    pub component: Option<String>,
    /// Any issues this commit closes
    pub closes: Vec<String>,
    /// Free-text breaking change notes
    pub breaks: Vec<String>,
    /// The commit type key, e.g. `feat` or `fix`
    pub commit_type: String,
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;

const SHORT_HASH_LEN: usize = 8;

impl Commit {
    /// Creates a commit without component, closed issues or breaking notes.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::git::Commit;
    /// let commit = Commit::new("fix", "handle empty input", "abcdef1234567890")
    ///     .component("parser")
    ///     .closes(["42"]);
    ///
    /// assert_eq!(commit.short_hash(), "abcdef12");
    /// ```
    pub fn new<T, S, H>(commit_type: T, subject: S, hash: H) -> Commit
    where
        T: Into<String>,
        S: Into<String>,
        H: Into<String>,
    {
        Commit {
            hash: hash.into(),
            subject: subject.into(),
            commit_type: commit_type.into(),
            ..Commit::default()
        }
    }

    pub fn component<S: Into<String>>(mut self, c: S) -> Commit {
        self.component = Some(c.into());
        self
    }

    pub fn closes<I, S>(mut self, issues: I) -> Commit
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.closes = issues.into_iter().map(|i| i.to_string()).collect();
        self
    }

    pub fn breaks<I, S>(mut self, notes: I) -> Commit
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breaks = notes.into_iter().map(Into::into).collect();
        self
    }

    /// The component this commit is grouped under, treating an empty name as
    /// no component at all
    pub fn component_name(&self) -> Option<&str> {
        self.component.as_deref().filter(|c| !c.is_empty())
    }

    /// The first eight characters of the hash, or all of it when shorter
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_truncates() {
        let c = Commit::new("feat", "x", "0123456789abcdef");
        assert_eq!(c.short_hash(), "01234567");
    }

    #[test]
    fn short_hash_keeps_short_input() {
        assert_eq!(Commit::new("feat", "x", "abc").short_hash(), "abc");
        assert_eq!(Commit::new("feat", "x", "").short_hash(), "");
    }

    #[test]
    fn empty_component_is_none() {
        let c = Commit::new("fix", "x", "h").component("");
        assert_eq!(c.component_name(), None);
        let c = c.component("core");
        assert_eq!(c.component_name(), Some("core"));
    }

    #[test]
    fn closes_accepts_numbers() {
        let c = Commit::new("fix", "x", "h").closes([42, 7]);
        assert_eq!(c.closes, vec!["42".to_owned(), "7".to_owned()]);
    }
}
