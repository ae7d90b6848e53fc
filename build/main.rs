mod cli {
    include!("../src/cli.rs");
}

use cli::Cmd;

use clap::CommandFactory;
use std::{env, error::Error, fs::create_dir_all, path::Path};

type DynResult = Result<(), Box<dyn Error>>;

fn main() -> DynResult {
    println!("cargo:rerun-if-changed=build/");
    println!("cargo:rerun-if-changed=src/cli.rs");
    let out_dir = Path::new(&env::var("OUT_DIR")?).to_path_buf();
    mangen(&out_dir)
}

/// Generate man page for the binary
fn mangen(out_dir: &Path) -> DynResult {
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

    eprintln!("Generating man page");

    let dest_dir = out_dir.join("manual/man1");
    create_dir_all(&dest_dir)?;

    clap_mangen::generate_to(Cmd::command().name("desktop-sweep"), &dest_dir)?;

    Ok(())
}
