//! Program execution command

use crate::cli::common::{apply_registers, dump_core, execute, load_core};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;
use std::path::Path;

/// Run a program to completion.
///
/// The program's image is installed (or its objects linked), any registers
/// given on the command line are set, and the core runs until it terminates,
/// faults, or exceeds the program's step limit.
pub fn run<'a>(project: &Project, prog: &Program, argv: &ArgMatches<'a>) -> io::Result<()> {
    let mut core = load_core(project, prog)?;
    apply_registers(&mut core, argv)?;

    let result = execute(&mut core, prog.max_steps(), |_, _| {});

    if let Some(dump) = argv.value_of("dump") {
        dump_core(&core, Path::new(dump))?;
    }

    let steps = result?;
    log::info!("Executed {} instructions", steps);

    Ok(())
}
