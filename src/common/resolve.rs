use crate::utils;
use derive_more::Deref;
use serde::Serialize;
use std::{
    ffi::OsString,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

/// Program that runs sandboxed applications.
/// Only its own presence is checked, never the application it is asked to run.
pub const CONTAINER_LAUNCHER: &str = "flatpak";

/// Snapshot of the executable search path
#[derive(Debug, Clone, Default, Deref)]
pub struct SearchPath(OsString);

impl SearchPath {
    #[cfg(test)]
    pub fn new(path: impl Into<OsString>) -> Self {
        Self(path.into())
    }

    /// Read `$PATH` from the environment
    #[mutants::skip] // Cannot test directly, depends on system state
    pub fn from_env() -> Self {
        Self(std::env::var_os("PATH").unwrap_or_default())
    }

    /// Find an executable by name, or check an explicit path
    pub fn which(&self, program: &str) -> Option<PathBuf> {
        let program = utils::expand_tilde(program);
        let cwd = std::env::current_dir().unwrap_or_else(|_| "/".into());
        which::which_in(program, Some(&self.0), cwd).ok()
    }
}

/// Why an executable could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// An explicit path that does not exist or is not executable
    Missing,
    /// A bare name that no directory on the search path provides
    NotOnPath,
    /// The container launcher itself is not installed
    NoLauncher,
    /// The launch directive could not be split into words
    BadExec,
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("executable does not exist"),
            Self::NotOnPath => f.write_str("executable not found in $PATH"),
            Self::NoLauncher => write!(f, "{CONTAINER_LAUNCHER} is not installed"),
            Self::BadExec => f.write_str("Exec value has unbalanced quotes"),
        }
    }
}

/// Outcome of looking up an executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The program was found
    Found(PathBuf),
    /// The container launcher was found
    Launcher(PathBuf),
    /// The program cannot be run
    Unresolvable(Problem),
}

/// Decide whether the given executable token names a program that can be run
pub fn resolve(program: &str, search_path: &SearchPath) -> Verdict {
    let is_path = program.contains('/') || program.starts_with('~');
    let is_launcher = Path::new(program)
        .file_name()
        .is_some_and(|name| name == CONTAINER_LAUNCHER);

    match (search_path.which(program), is_launcher, is_path) {
        (Some(found), true, _) => Verdict::Launcher(found),
        (Some(found), false, _) => Verdict::Found(found),
        (None, true, _) => Verdict::Unresolvable(Problem::NoLauncher),
        (None, false, true) => Verdict::Unresolvable(Problem::Missing),
        (None, false, false) => Verdict::Unresolvable(Problem::NotOnPath),
    }
}
