use std::path::PathBuf;

/// Custom error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error(transparent)]
    Config(#[from] confy::ConfyError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("could not read any desktop entry directory")]
    NoSearchDirs,
    #[error("malformed desktop entry at {0}, line {1}")]
    BadEntry(PathBuf, usize),
    #[error("no Exec key in desktop entry at {0}")]
    NoExec(PathBuf),
    #[error("Could not split exec command '{0}' in desktop file '{1}' into shell words")]
    BadExec(String, String),
    #[error("Could not split command '{0}' into shell words")]
    BadCmd(String),
    #[error("'{0}' is not one of [d]elete, [e]dit, [s]kip or [q]uit")]
    BadChoice(String),
    #[error("could not run '{0}': {1}")]
    Spawn(String, std::io::Error),
    #[error("'{0}' exited with {1}")]
    Failed(String, std::process::ExitStatus),
    #[cfg(test)]
    #[error(transparent)]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
