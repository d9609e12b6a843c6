use std::env;
use std::io::Result;

use clap::CommandFactory;
use clap_complete::{generate_to, Shell};

#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;


const BIN_NAME: &str = "fhdrctl";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let Some(outdir) = env::var_os("CARGO_TARGET_DIR").or_else(|| env::var_os("OUT_DIR")) else {
        return Ok(());
    };

    let mut cmd = cli::Args::command();

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::Elvish] {
        generate_to(shell, &mut cmd, BIN_NAME, &outdir)?;
    }

    Ok(())
}
