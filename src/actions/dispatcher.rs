use crate::error::{Error, Result};
use log::{debug, info};
use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    io::ErrorKind,
    iter,
    path::Path,
    process::Command,
};

/// What happened to a broken desktop entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    Edited,
    Skipped,
}

/// Carries out the user's choice for a broken desktop entry,
/// going through the elevation helper when the file is not ours to change
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    /// Editor command line, possibly with arguments
    editor: &'a str,
    /// Program that re-runs a command with elevated privileges
    elevator: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(editor: &'a str, elevator: &'a str) -> Self {
        Self { editor, elevator }
    }

    /// Delete the file, asking for elevated privileges once if needed
    pub fn delete(&self, path: &Path) -> Result<Outcome> {
        debug!("Deleting {}", path.display());
        match fs::remove_file(path) {
            Ok(()) => Ok(Outcome::Deleted),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                info!("Not allowed to delete {}, elevating", path.display());
                run(&self.elevated_delete_command(path))?;
                Ok(Outcome::Deleted)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Command line removing the file through the elevation helper
    fn elevated_delete_command(&self, path: &Path) -> Vec<OsString> {
        [self.elevator, "rm", "--"]
            .into_iter()
            .map(OsString::from)
            .chain(iter::once(path.as_os_str().to_owned()))
            .collect()
    }

    /// Open the file in the editor, through the elevation helper if it is not writable
    pub fn edit(&self, path: &Path) -> Result<Outcome> {
        // Opening for writing without truncating leaves the file untouched
        let elevated = match OpenOptions::new().write(true).open(path) {
            Ok(_) => false,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                info!("Not allowed to edit {}, elevating", path.display());
                true
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Editing {} with {}", path.display(), self.editor);
        run(&self.edit_command(path, elevated)?)?;
        Ok(Outcome::Edited)
    }

    /// Command line opening the file in the editor,
    /// prefixed with the elevation helper when `elevated` is set
    fn edit_command(&self, path: &Path, elevated: bool) -> Result<Vec<OsString>> {
        let editor = shlex::split(self.editor)
            .filter(|words| !words.is_empty())
            .ok_or_else(|| Error::BadCmd(self.editor.to_owned()))?;

        Ok(elevated
            .then_some(self.elevator)
            .into_iter()
            .chain(editor.iter().map(String::as_str))
            .map(OsString::from)
            .chain(iter::once(path.as_os_str().to_owned()))
            .collect())
    }
}

/// Run a command line in the foreground and wait for it to exit successfully
#[mutants::skip] // Cannot test directly, runs external command
fn run(command: &[OsString]) -> Result<()> {
    debug!("Running {command:?}");
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::BadCmd(String::new()))?;
    let name = program.to_string_lossy().into_owned();

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| Error::Spawn(name.clone(), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Failed(name, status))
    }
}
