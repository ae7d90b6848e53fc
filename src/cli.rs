use clap::Parser;

/// Sweep away broken desktop entries
///
/// Scans the usual application, autostart and session directories for
/// `.desktop` files whose `Exec` program can no longer be found, then asks
/// what to do with each one: delete it, edit it, or leave it alone.
///
/// Files you cannot write are handed to the elevation helper (`pkexec` by
/// default, see ~/.config/desktop-sweep/desktop-sweep.toml).
///
/// The editor is taken from `EDITOR`, falling back to `default_editor`
/// in the config file.
#[deny(missing_docs)]
#[derive(Parser)]
#[clap(version, about)]
pub struct Cmd {
    /// Show debugging messages
    #[clap(long, short)]
    pub verbose: bool,

    /// Only list broken entries, do not prompt
    ///
    /// Output is formatted as a table with the columns
    /// path, exec, executable and problem.
    #[clap(long, short)]
    pub list: bool,

    /// Output the list as json
    ///
    /// Output will be in the form:
    ///
    /// [
    ///   {
    ///     "path": "/usr/share/applications/gone.desktop",
    ///     "exec": "gone %U",
    ///     "executable": "gone",
    ///     "problem": "not_on_path"
    ///   },
    ///   ...
    /// ]
    #[clap(long, requires = "list", verbatim_doc_comment)]
    pub json: bool,
}
