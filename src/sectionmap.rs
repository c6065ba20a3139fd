use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::git::Commit;

/// The second level of the changelog, i.e. the components -> commit
/// information. `None` holds the commits without a component and sorts before
/// every named component.
pub type ComponentMap = BTreeMap<Option<String>, Vec<Commit>>;

/// A struct which holds sections to components->commits maps, plus the
/// breaking changes collected across every commit
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    /// The top level map of the changelog, i.e. commit type -> components,
    /// in the order the commit types were given
    pub sections: IndexMap<String, ComponentMap>,
    /// Breaking change notes, always grouped under no component
    pub breaks: ComponentMap,
}

impl SectionMap {
    /// Creates a section map from a vector of commits, which we can then
    /// iterate through and write.
    ///
    /// Every key of `section_keys` gets an (initially empty) entry. Commits
    /// whose type is not one of those keys are left out of `sections`, but
    /// their breaking notes are still collected.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_writer::{git::Commit, SectionMap};
    /// let commits = vec![
    ///     Commit::new("feat", "add widgets", "1111111111").component("ui"),
    ///     Commit::new("chore", "bump deps", "2222222222").breaks(["drops MSRV 1.60"]),
    /// ];
    /// let sm = SectionMap::from_commits(commits, ["feat", "fix"]);
    ///
    /// assert_eq!(sm.sections.len(), 2);
    /// assert!(sm.sections["fix"].is_empty());
    /// assert_eq!(sm.breaks[&None::<String>][0].subject, "drops MSRV 1.60");
    /// ```
    pub fn from_commits<I, S>(commits: Vec<Commit>, section_keys: I) -> SectionMap
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sm = SectionMap {
            sections: section_keys
                .into_iter()
                .map(|k| (k.into(), ComponentMap::new()))
                .collect(),
            breaks: ComponentMap::new(),
        };
        debug!(
            "Grouping {} commits into {} sections",
            commits.len(),
            sm.sections.len()
        );

        for entry in commits {
            for note in &entry.breaks {
                sm.breaks.entry(None).or_default().push(Commit {
                    hash: entry.hash.clone(),
                    subject: note.clone(),
                    commit_type: entry.commit_type.clone(),
                    ..Commit::default()
                });
            }

            match sm.sections.get_mut(&entry.commit_type) {
                Some(comp_map) => {
                    let component = entry.component_name().map(ToOwned::to_owned);
                    comp_map.entry(component).or_default().push(entry);
                }
                None => trace!(
                    "Skipping commit {} with unlisted type {:?}",
                    entry.short_hash(),
                    entry.commit_type
                ),
            }
        }

        sm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(v: &[Commit]) -> Vec<&str> { v.iter().map(|c| &*c.subject).collect() }

    #[test]
    fn seeds_every_key_in_order() {
        let sm = SectionMap::from_commits(vec![], ["perf", "feat", "fix"]);
        let keys: Vec<_> = sm.sections.keys().map(String::as_str).collect();
        assert_eq!(keys, ["perf", "feat", "fix"]);
        assert!(sm.sections.values().all(BTreeMap::is_empty));
        assert!(sm.breaks.is_empty());
    }

    #[test]
    fn groups_by_component_keeping_order() {
        let commits = vec![
            Commit::new("feat", "one", "a1").component("core"),
            Commit::new("feat", "two", "a2"),
            Commit::new("feat", "three", "a3").component("core"),
            Commit::new("fix", "four", "a4").component(""),
        ];
        let sm = SectionMap::from_commits(commits, ["feat", "fix"]);

        let feat = &sm.sections["feat"];
        assert_eq!(subjects(&feat[&Some("core".to_owned())]), ["one", "three"]);
        assert_eq!(subjects(&feat[&None::<String>]), ["two"]);
        assert_eq!(subjects(&sm.sections["fix"][&None::<String>]), ["four"]);
    }

    #[test]
    fn unknown_types_only_contribute_breaks() {
        let commits = vec![
            Commit::new("docs", "readme", "d1").breaks(["first", "second"]),
            Commit::new("feat", "api", "d2").breaks(["third"]),
        ];
        let sm = SectionMap::from_commits(commits, ["feat"]);

        assert_eq!(sm.sections.len(), 1);
        assert!(!sm.sections.contains_key("docs"));

        let breaks = &sm.breaks[&None::<String>];
        assert_eq!(subjects(breaks), ["first", "second", "third"]);
        let hashes: Vec<_> = breaks.iter().map(|c| &*c.hash).collect();
        assert_eq!(hashes, ["d1", "d1", "d2"]);
        assert!(breaks.iter().all(|c| c.closes.is_empty()));
        assert_eq!(sm.breaks.len(), 1);
    }

    #[test]
    fn none_component_sorts_first() {
        let commits = vec![
            Commit::new("fix", "b", "1").component("beta"),
            Commit::new("fix", "n", "2"),
            Commit::new("fix", "a", "3").component("alpha"),
        ];
        let sm = SectionMap::from_commits(commits, ["fix"]);
        let order: Vec<_> = sm.sections["fix"].keys().cloned().collect();
        assert_eq!(
            order,
            [None, Some("alpha".to_owned()), Some("beta".to_owned())]
        );
    }
}
