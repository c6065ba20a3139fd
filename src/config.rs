use indexmap::IndexMap;
use serde::Deserialize;

use crate::link_style::LinkStyle;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub clog: RawClogCfg,
    /// commit type -> section title, kept in file order
    #[serde(default)]
    pub subjects: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawClogCfg {
    pub version: Option<String>,
    pub subtitle: Option<String>,
    pub repository: Option<String>,
    pub link_style: LinkStyle,
    pub changelog: Option<String>,
    pub infile: Option<String>,
    pub outfile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config() {
        let cfg = r#"
            [clog]
            version = "1.2.0"
            subtitle = "my awesome title"
            repository = "https://github.com/clog-tool/clog-writer"
            link-style = "Stash"
            infile = "My_old_changelog.md"
            outfile = "MyChangelog.md"

            [subjects]
            feat = "Features"
            fix = "Bug Fixes"
            chore = "Housekeeping"
        "#;
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(cfg.clog.version, Some("1.2.0".into()));
        assert_eq!(
            cfg.clog.repository,
            Some("https://github.com/clog-tool/clog-writer".into())
        );
        assert_eq!(cfg.clog.subtitle, Some("my awesome title".into()));
        assert_eq!(cfg.clog.link_style, LinkStyle::Stash);
        assert_eq!(cfg.clog.changelog, None);
        assert_eq!(cfg.clog.outfile, Some("MyChangelog.md".into()));
        assert_eq!(cfg.clog.infile, Some("My_old_changelog.md".into()));
        let keys: Vec<_> = cfg.subjects.keys().map(String::as_str).collect();
        assert_eq!(keys, ["feat", "fix", "chore"]);
        assert_eq!(cfg.subjects.get("chore"), Some(&"Housekeeping".to_owned()));
    }

    #[test]
    fn dogfood_config() {
        let cfg = include_str!("../.clog.toml");
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(
            cfg.clog.repository,
            Some("https://github.com/clog-tool/clog-writer".into())
        );
        assert_eq!(cfg.clog.link_style, LinkStyle::Github);
        assert_eq!(cfg.clog.changelog, Some("CHANGELOG.md".into()));
    }

    #[test]
    fn empty_config() {
        let cfg: RawCfg = toml::from_str("").unwrap();
        assert!(cfg.subjects.is_empty());
        assert_eq!(cfg.clog.link_style, LinkStyle::Github);
        assert_eq!(cfg.clog.version, None);
    }
}
