//! Single-run tracing command

use crate::cli::common::{apply_registers, execute, load_core};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;

/// Trace execution of a particular program and display the results to the
/// user.
pub fn trace<'a>(project: &Project, prog: &Program, argv: &ArgMatches<'a>) -> io::Result<()> {
    let mut core = load_core(project, prog)?;
    apply_registers(&mut core, argv)?;

    execute(&mut core, prog.max_steps(), |core, op| {
        println!("{:06X}: {}", core.instruction_address(), op);
    })?;

    Ok(())
}
