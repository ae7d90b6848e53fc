use crate::error::{Error, Result};
use itertools::Itertools;
use log::{debug, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// System-wide locations that are not covered by the XDG base directories
static SYSTEM_DIRS: &[&str] = &[
    "/usr/share/gnome/applications",
    "/usr/share/kservices5",
    // Containerized apps
    "/var/lib/snapd/desktop/applications",
    "/var/lib/flatpak/exports/share/applications",
    // Sessions
    "/usr/share/xsessions",
    "/usr/local/share/xsessions",
    "/usr/share/wayland-sessions",
    "/usr/local/share/wayland-sessions",
];

/// Get the conventional directories holding desktop entry files
#[mutants::skip] // Cannot test directly, depends on system state
pub fn default_dirs() -> Result<Vec<PathBuf>> {
    let xdg = xdg::BaseDirectories::new()?;
    let home = dirs::home_dir().unwrap_or_default();

    let user = [
        xdg.get_data_home().join("applications"),
        home.join(".gnome/apps"),
        home.join(".var/app"),
        xdg.get_config_home().join("autostart"),
    ];

    let autostart = xdg.get_config_dirs().into_iter().map(|d| d.join("autostart"));
    let applications =
        xdg.get_data_dirs().into_iter().map(|d| d.join("applications"));

    Ok(user
        .into_iter()
        .chain(autostart)
        .chain(applications)
        .chain(SYSTEM_DIRS.iter().map(PathBuf::from))
        .collect())
}

/// Keep the directories that can be listed, each physical directory once
pub fn readable_dirs(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let readable = dirs
        .iter()
        .filter_map(|dir| match fs::read_dir(dir) {
            Ok(_) => dir.canonicalize().ok(),
            Err(e) => {
                debug!("Skipping {}: {e}", dir.display());
                None
            }
        })
        .unique()
        .collect_vec();

    if readable.is_empty() {
        Err(Error::NoSearchDirs)
    } else {
        Ok(readable)
    }
}

/// List the desktop entry files of every directory, sorted by name per directory
///
/// The listing happens lazily, one directory at a time.
pub fn desktop_files(dirs: Vec<PathBuf>) -> impl Iterator<Item = PathBuf> {
    dirs.into_iter().flat_map(|dir| list_dir(&dir))
}

/// List the desktop entry files of a single directory
fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Could not read {}: {e}", dir.display());
            return Vec::new();
        }
    };

    read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("desktop"))
        .filter(|p| !p.is_dir())
        .sorted()
        .collect_vec()
}
