use crate::{
    error::{Error, Result},
    utils,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Name of the group every desktop entry file is expected to carry
const MAIN_GROUP: &str = "Desktop Entry";
/// The launch directive
const EXEC_KEY: &str = "Exec";

/// A parsed desktop entry file: its groups in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopFile {
    pub groups: Vec<(String, BTreeMap<String, String>)>,
}

impl DesktopFile {
    /// Parse the contents of a desktop entry file
    ///
    /// `path` is only used for error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut groups: Vec<(String, BTreeMap<String, String>)> = Vec::new();

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let bad_line = || Error::BadEntry(path.to_owned(), idx + 1);

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(bad_line)?;
                groups.push((name.to_owned(), BTreeMap::new()));
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(bad_line)?;
            let (_, keys) = groups.last_mut().ok_or_else(bad_line)?;

            // First occurrence of a key wins
            keys.entry(key.trim().to_owned())
                .or_insert_with(|| unescape(value.trim()));
        }

        Ok(Self { groups })
    }

    /// Get the value of a key within a group
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .and_then(|(_, keys)| keys.get(key))
            .map(String::as_str)
    }

    /// Get the launch directive, preferring the main group
    pub fn exec(&self) -> Option<&str> {
        self.get(MAIN_GROUP, EXEC_KEY).or_else(|| {
            self.groups
                .iter()
                .find_map(|(_, keys)| keys.get(EXEC_KEY))
                .map(String::as_str)
        })
    }
}

/// Undo the string-level escapes allowed in desktop entry values
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            // Leave unknown escapes alone, the Exec quoting rules use them
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// A desktop entry file that is a candidate for being broken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Location of the desktop entry file
    pub path: PathBuf,
    /// Raw value of the launch directive
    pub exec: String,
}

impl DesktopEntry {
    /// Extract the program that the launch directive runs
    ///
    /// Field codes are dropped and a leading `env NAME=value ...` is skipped.
    /// Returns `Ok(None)` if no program is named at all.
    pub fn executable(&self) -> Result<Option<String>> {
        static FIELD_CODE: Lazy<Regex> = Lazy::new(|| {
            Regex::new("^%[fFuUdDnNickvm%]$")
                .expect("field code regex is valid")
        });

        let words = shlex::split(&self.exec).ok_or_else(|| {
            Error::BadExec(self.exec.clone(), utils::display_path(&self.path))
        })?;

        let mut words = words.into_iter().filter(|w| !FIELD_CODE.is_match(w));

        Ok(match words.next() {
            Some(first) if first == "env" => words.find(|w| !w.contains('=')),
            first => first,
        }
        .filter(|w| !w.is_empty()))
    }
}

impl TryFrom<PathBuf> for DesktopEntry {
    type Error = Error;
    fn try_from(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let file = DesktopFile::parse(&path, &content)?;

        let exec = file
            .exec()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::NoExec(path.clone()))?
            .to_owned();

        Ok(Self { path, exec })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn entry(exec: &str) -> DesktopEntry {
        DesktopEntry {
            path: PathBuf::from("test.desktop"),
            exec: exec.to_owned(),
        }
    }

    #[test]
    fn parse_groups() -> Result<()> {
        let file = DesktopFile::parse(
            Path::new("test.desktop"),
            "# comment\n\n[Desktop Entry]\nName = Thing\nExec=thing %U\nExec=other\n\n[Desktop Action new]\nExec=thing --new\n",
        )?;

        assert_eq!(file.groups.len(), 2);
        assert_eq!(file.get("Desktop Entry", "Name"), Some("Thing"));
        assert_eq!(file.exec(), Some("thing %U"));
        assert_eq!(file.get("Desktop Action new", "Exec"), Some("thing --new"));
        Ok(())
    }

    #[test]
    fn byte_order_mark() -> Result<()> {
        let file = DesktopFile::parse(
            Path::new("a.desktop"),
            "\u{feff}[Desktop Entry]\nExec=gone-xyz\n",
        )?;
        assert_eq!(file.exec(), Some("gone-xyz"));
        Ok(())
    }

    #[test]
    fn exec_key_is_case_sensitive() -> Result<()> {
        let file = DesktopFile::parse(
            Path::new("test.desktop"),
            "[Desktop Entry]\nexec=nope\nEXEC=nope\n",
        )?;
        assert_eq!(file.exec(), None);
        Ok(())
    }

    #[test]
    fn exec_falls_back_to_other_groups() -> Result<()> {
        let file = DesktopFile::parse(
            Path::new("test.desktop"),
            "[KDE Service]\nExec=kservice\n[Other]\nExec=second\n",
        )?;
        assert_eq!(file.exec(), Some("kservice"));
        Ok(())
    }

    #[test]
    fn malformed_lines() {
        let before_group =
            DesktopFile::parse(Path::new("a.desktop"), "Exec=foo\n");
        assert!(matches!(before_group, Err(Error::BadEntry(_, 1))));

        let no_equals = DesktopFile::parse(
            Path::new("a.desktop"),
            "[Desktop Entry]\nName=a\nthis is not a key\n",
        );
        assert!(matches!(no_equals, Err(Error::BadEntry(_, 3))));

        let open_header =
            DesktopFile::parse(Path::new("a.desktop"), "[Desktop Entry\n");
        assert!(matches!(open_header, Err(Error::BadEntry(_, 1))));
    }

    #[test]
    fn unescape_values() {
        assert_eq!(unescape(r"a\sb\tc\\d"), "a b\tc\\d");
        assert_eq!(unescape(r#"sh -c \"x\""#), r#"sh -c \"x\""#);
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn executable_token() -> Result<()> {
        assert_eq!(entry("firefox %u").executable()?, Some("firefox".into()));
        assert_eq!(
            entry("/usr/bin/does-not-exist-xyz %U").executable()?,
            Some("/usr/bin/does-not-exist-xyz".into())
        );
        assert_eq!(
            entry("flatpak run org.example.App").executable()?,
            Some("flatpak".into())
        );
        assert_eq!(
            entry("\"/opt/My App/app\" --flag").executable()?,
            Some("/opt/My App/app".into())
        );
        assert_eq!(
            entry("env GDK_BACKEND=x11 LANG=C steam %U").executable()?,
            Some("steam".into())
        );
        assert_eq!(entry("%F").executable()?, None);
        assert_eq!(entry("env A=b").executable()?, None);
        Ok(())
    }

    #[test]
    fn unbalanced_quotes() {
        assert!(matches!(
            entry("\"broken --arg").executable(),
            Err(Error::BadExec(..))
        ));
    }

    #[test]
    fn read_fixtures() -> Result<()> {
        let entry =
            DesktopEntry::try_from(PathBuf::from("tests/flatpak.desktop"))?;
        assert_eq!(
            entry.exec,
            "/usr/bin/flatpak run --branch=stable --arch=x86_64 --command=app org.example.App @@u %U @@"
        );
        assert_eq!(entry.executable()?, Some("/usr/bin/flatpak".into()));

        let no_exec =
            DesktopEntry::try_from(PathBuf::from("tests/no_exec.desktop"));
        assert!(matches!(no_exec, Err(Error::NoExec(_))));

        let empty_exec =
            DesktopEntry::try_from(PathBuf::from("tests/empty_exec.desktop"));
        assert!(matches!(empty_exec, Err(Error::NoExec(_))));

        let missing =
            DesktopEntry::try_from(PathBuf::from("tests/not-there.desktop"));
        assert!(matches!(missing, Err(Error::Io(_))));

        Ok(())
    }
}
