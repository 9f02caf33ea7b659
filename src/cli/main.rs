//! CLI support for non-command bits

use crate::cli::common::{resolve_program, Command};
use crate::{cli, project};
use clap::{App, AppSettings, Arg, ArgSettings};
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp);
    app = app.arg(
        Arg::with_name("program")
            .long("program")
            .value_name("myapp")
            .takes_value(true)
            .help("Which program in the project to use")
            .set(ArgSettings::Global),
    );
    app = project::Program::configure_app(app);
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name("cisc0.json")
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    let project_filename = matches.value_of("project").unwrap_or("cisc0.json");
    let program_name = matches.value_of("program");
    let cli_prog = project::Program::from_arg_matches(&matches)?;

    let (command, submatches) = matches.subcommand();
    let command = Command::from_str(command).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unknown command {}", command),
        )
    })?;
    let submatches = submatches
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Missing command arguments"))?;

    let project = project::Project::read_or_default(project_filename)?;
    let prog = resolve_program(&project, program_name, cli_prog)?;

    match command {
        Command::Run => cli::run(&project, &prog, submatches)?,
        Command::Trace => cli::trace(&project, &prog, submatches)?,
        Command::Disassemble => cli::dis(&project, &prog, submatches)?,
        Command::Link => cli::link(&project, &prog, submatches)?,
    };

    Ok(())
}
