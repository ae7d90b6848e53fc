mod actions;
mod cli;
mod common;
mod config;
mod error;
mod utils;

use cli::Cmd;
use config::Config;
use error::Result;

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

#[mutants::skip] // Cannot test directly at the moment
fn main() -> Result<()> {
    CompleteEnv::with_factory(|| Cmd::command().name("desktop-sweep"))
        .completer("desktop-sweep")
        .complete();

    let cmd = Cmd::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if cmd.verbose { "debug" } else { "warn" }),
    )
    .format_timestamp(None)
    .init();

    let config = Config::new()?;
    let mut stdout = std::io::stdout().lock();

    if cmd.list {
        config.list(&mut stdout, cmd.json)
    } else {
        config
            .fix(&mut std::io::stdin().lock(), &mut stdout)
            .map(|_| ())
    }
}
