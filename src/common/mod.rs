mod desktop_entry;
mod finding;
mod locations;
mod resolve;
mod table;

pub use desktop_entry::DesktopEntry;
pub use finding::{Finding, FindingRow};
pub use locations::{default_dirs, desktop_files, readable_dirs};
pub use resolve::{resolve, Problem, SearchPath, Verdict};
pub use table::render_table;
