use log::{debug, error, info, warn};
use std::{
    io::{BufRead, IsTerminal, Write},
    path::PathBuf,
};
use wildmatch::WildMatch;

use crate::{
    actions::{ask, Choice, Dispatcher, Outcome},
    common::{
        default_dirs, desktop_files, readable_dirs, render_table,
        DesktopEntry, Finding, FindingRow, SearchPath,
    },
    config::config_file::ConfigFile,
    error::{Error, Result},
};

/// A single struct that holds everything resolved at startup.
/// Used to streamline explicitly passing state.
#[derive(Debug, Default)]
pub struct Config {
    /// Editor command line, from `EDITOR` or the config file
    pub editor: String,
    /// Program that re-runs a command with elevated privileges
    pub elevator: String,
    /// Directories to look for desktop entries in
    pub search_dirs: Vec<PathBuf>,
    /// File name patterns that are never flagged
    pub ignore: Vec<WildMatch>,
    /// Where executables are looked up
    pub search_path: SearchPath,
    /// Whether or not stdout is a terminal
    pub terminal_output: bool,
}

/// Tally of a finished interactive run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub deleted: usize,
    pub edited: usize,
}

impl Config {
    /// Create a new instance of Config
    #[mutants::skip] // Cannot test directly, depends on system state
    pub fn new() -> Result<Self> {
        let file = ConfigFile::load()?;

        Ok(Self {
            editor: file.editor(std::env::var("EDITOR").ok()),
            elevator: file.elevator.clone(),
            search_dirs: default_dirs()?
                .into_iter()
                .chain(file.extra_dirs.iter().cloned())
                .collect(),
            ignore: file.ignore.iter().map(|p| WildMatch::new(p)).collect(),
            search_path: SearchPath::from_env(),
            terminal_output: std::io::stdout().is_terminal(),
        })
    }

    /// Whether the file name matches one of the ignore patterns
    fn is_ignored(&self, path: &std::path::Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.ignore.iter().any(|pattern| pattern.matches(&name))
    }

    /// Scan every search directory for broken desktop entries
    ///
    /// Fails only if none of the directories can be read.
    pub fn scan(&self) -> Result<impl Iterator<Item = Finding> + '_> {
        let dirs = readable_dirs(&self.search_dirs)?;
        debug!("Scanning {dirs:?}");
        debug!("Looking up executables in {:?}", &*self.search_path);

        Ok(desktop_files(dirs)
            .filter(|path| !self.is_ignored(path))
            .filter_map(|path| match DesktopEntry::try_from(path) {
                Ok(entry) => Some(entry),
                Err(e @ Error::NoExec(_)) => {
                    info!("{e}");
                    None
                }
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .filter_map(|entry| Finding::check(entry, &self.search_path)))
    }

    /// Print all broken desktop entries without asking anything
    pub fn list<W: Write>(&self, writer: &mut W, output_json: bool) -> Result<()> {
        let findings = self.scan()?.collect::<Vec<_>>();

        let output = if output_json {
            serde_json::to_string(&findings)?
        } else {
            let rows = findings.iter().map(FindingRow::from).collect::<Vec<_>>();
            render_table(&rows, self.terminal_output)
        };

        writeln!(writer, "{output}")?;
        Ok(())
    }

    /// Ask what to do with every broken desktop entry and do it
    pub fn fix<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Summary> {
        let dispatcher = Dispatcher::new(&self.editor, &self.elevator);
        // Entries left unseen after quitting still count in the summary
        let findings = self.scan()?.collect::<Vec<_>>();
        let mut summary = Summary {
            found: findings.len(),
            ..Default::default()
        };

        for finding in findings {
            writeln!(output)?;
            finding.render(output)?;

            let outcome = match ask(input, output)? {
                Choice::Quit => break,
                Choice::Skip => Ok(Outcome::Skipped),
                Choice::Delete => dispatcher.delete(&finding.path),
                Choice::Edit => dispatcher.edit(&finding.path),
            };

            match outcome {
                Ok(Outcome::Deleted) => summary.deleted += 1,
                Ok(Outcome::Edited) => summary.edited += 1,
                Ok(Outcome::Skipped) => {}
                Err(e) => {
                    error!("{}: {e}", finding.path.display());
                    writeln!(output, "error: {e}")?;
                }
            }
        }

        summary.print(output)?;
        Ok(summary)
    }
}

impl Summary {
    /// Write the closing report of an interactive run
    pub fn print<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer)?;
        if self.found == 0 {
            writeln!(writer, "No broken desktop files were found.")?;
            return Ok(());
        }

        writeln!(writer, "{} potentially broken desktop files were found.", self.found)?;
        if self.deleted > 0 {
            writeln!(writer, "{} deleted.", self.deleted)?;
        }
        if self.edited > 0 {
            writeln!(writer, "{} edited.", self.edited)?;
        }
        Ok(())
    }
}
