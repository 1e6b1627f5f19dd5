//! promptcat: flatten a source tree and your instructions into one prompt.

mod cli;
mod core;
mod domain;
mod infra;

fn main() -> anyhow::Result<()> {
    cli::commands::run()
}
