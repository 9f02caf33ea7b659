//! Object linking command

use crate::cli::common::{dump_core, link_program};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;
use std::path::PathBuf;

/// Link object files into an image.
///
/// Objects named on the command line replace the ones listed in the project.
/// The image is written to `--output`, the program's configured output, or
/// `cisc0.img`, in that order of preference.
pub fn link<'a>(project: &Project, prog: &Program, argv: &ArgMatches<'a>) -> io::Result<()> {
    let mut cli_prog = Program::default();

    for object in argv.values_of("objects").into_iter().flatten() {
        cli_prog.add_object_path(object);
    }

    let prog = prog.apply_override(&cli_prog);
    if prog.iter_objects().next().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Did not specify any object files to link",
        ));
    }

    let output = match (argv.value_of("output"), prog.output()) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => path.resolve(project.root()),
        (None, None) => PathBuf::from("cisc0.img"),
    };

    let core = link_program(project, &prog)?;
    dump_core(&core, &output)
}
