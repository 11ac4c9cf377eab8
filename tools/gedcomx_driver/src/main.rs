//! The executable of the `gedcomx` tool.

use std::process::ExitCode;

use clap::Parser;
use gedcomx_driver::Arguments;

fn main() -> ExitCode {
    env_logger::init();

    gedcomx_driver::run(
        Arguments::parse(),
        &mut std::io::stderr(),
        &mut std::io::stdout(),
    )
}
