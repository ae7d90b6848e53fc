use crate::{
    common::{resolve, DesktopEntry, Problem, SearchPath, Verdict},
    error::{Error, Result},
    utils,
};
use log::debug;
use serde::Serialize;
use std::{io::Write, path::PathBuf};
use tabled::Tabled;

/// A desktop entry whose executable cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Location of the desktop entry file
    pub path: PathBuf,
    /// Raw value of the launch directive
    pub exec: String,
    /// Program named by the launch directive, if it could be extracted
    pub executable: Option<String>,
    /// Why the program cannot be run
    pub problem: Problem,
}

impl Finding {
    /// Check a desktop entry, returning a finding if it is broken
    ///
    /// Entries without a program in their launch directive are never flagged.
    pub fn check(
        entry: DesktopEntry,
        search_path: &SearchPath,
    ) -> Option<Finding> {
        let executable = match entry.executable() {
            Ok(Some(executable)) => executable,
            Ok(None) => {
                debug!("{}: no executable in '{}'", entry.path.display(), entry.exec);
                return None;
            }
            Err(e @ Error::BadExec(..)) => {
                debug!("{e}");
                return Some(Finding {
                    path: entry.path,
                    exec: entry.exec,
                    executable: None,
                    problem: Problem::BadExec,
                });
            }
            Err(e) => {
                debug!("{e}");
                return None;
            }
        };

        match resolve(&executable, search_path) {
            Verdict::Unresolvable(problem) => Some(Finding {
                path: entry.path,
                exec: entry.exec,
                executable: Some(executable),
                problem,
            }),
            Verdict::Found(found) | Verdict::Launcher(found) => {
                debug!("{} runs {}", entry.path.display(), found.display());
                None
            }
        }
    }

    /// Write the finding as a box for the interactive prompt
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "╭─ {}", utils::display_path(&self.path))?;
        writeln!(writer, "│")?;
        writeln!(writer, "├─ Exec        {}", self.exec)?;
        if let Some(executable) = self.executable.as_ref().filter(|e| **e != self.exec) {
            writeln!(writer, "├─ Executable  {executable}")?;
        }
        writeln!(writer, "├─ Problem     {}", self.problem)?;
        writeln!(writer, "│")?;
        Ok(())
    }
}

/// Internal helper struct for turning a Finding into tabular data
#[derive(Tabled)]
pub struct FindingRow {
    path: String,
    exec: String,
    executable: String,
    problem: String,
}

impl From<&Finding> for FindingRow {
    fn from(finding: &Finding) -> Self {
        Self {
            path: utils::display_path(&finding.path),
            exec: finding.exec.clone(),
            executable: finding.executable.clone().unwrap_or_default(),
            problem: finding.problem.to_string(),
        }
    }
}
