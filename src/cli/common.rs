//! Common utilities for command implementations

use crate::arch::cisc0::{link, read_records, Core, Operation, StdConsole, DEFAULT_CAPACITY};
use crate::input::parse_register_assignment;
use crate::project::{Program, Project};
use clap::{App, Arg, ArgMatches, SubCommand};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::{fs, io};

/// Enumeration of all CLI commands
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Trace,
    Disassemble,
    Link,
}

fn register_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("register")
        .long("register")
        .short("r")
        .value_name("sp=0x8000")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
        .help("Set a register before execution starts")
}

impl Command {
    /// Enumerate all commands that cisc0 recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Run, Trace, Disassemble, Link]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Run => SubCommand::with_name("run")
                .about("Run a program until it terminates")
                .arg(register_arg())
                .arg(
                    Arg::with_name("dump")
                        .long("dump")
                        .value_name("final.img")
                        .takes_value(true)
                        .help("Write the final machine state to an image file"),
                ),
            Command::Trace => SubCommand::with_name("trace")
                .about("Run a program, listing every instruction as it executes")
                .arg(register_arg()),
            Command::Disassemble => SubCommand::with_name("dis")
                .about("Display code starting at a given address")
                .arg(
                    Arg::with_name("start")
                        .value_name("0x0")
                        .index(1)
                        .required(true)
                        .help("The address to start listing code from"),
                )
                .arg(
                    Arg::with_name("count")
                        .long("count")
                        .short("n")
                        .value_name("16")
                        .takes_value(true)
                        .help("How many instructions to list"),
                ),
            Command::Link => SubCommand::with_name("link")
                .about("Link object files into a program image")
                .arg(
                    Arg::with_name("objects")
                        .value_name("file.o")
                        .index(1)
                        .multiple(true)
                        .help("Object files to link, in order"),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .value_name("cisc0.img")
                        .takes_value(true)
                        .help("Where to write the linked image"),
                ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "run" => Ok(Command::Run),
            "trace" => Ok(Command::Trace),
            "dis" => Ok(Command::Disassemble),
            "link" => Ok(Command::Link),
            _ => Err(()),
        }
    }
}

/// Determine which program the user wants, and merge the command line
/// options into its configuration.
pub fn resolve_program(
    project: &Project,
    name: Option<&str>,
    cli_prog: Program,
) -> io::Result<Program> {
    match name {
        Some(name) => match project.program(name) {
            Some(project_program) => Ok(project_program.apply_override(&cli_prog)),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("The specified program {} does not exist.", name),
            )),
        },
        None => match project.default_program() {
            Some((_, default_program)) => Ok(default_program.apply_override(&cli_prog)),
            None => Ok(cli_prog),
        },
    }
}

/// Link every object file a program lists into a fresh core.
pub fn link_program(project: &Project, prog: &Program) -> io::Result<Core> {
    let mut records = Vec::new();

    for object in prog.iter_objects() {
        let path = object.resolve(project.root());
        let mut file = BufReader::new(fs::File::open(&path)?);

        records.extend(read_records(&mut file)?);
    }

    let capacity = prog.capacity().unwrap_or(DEFAULT_CAPACITY);

    Ok(link(&records, capacity, StdConsole)?)
}

/// Construct the core a program starts from.
///
/// Programs with an image load it directly; otherwise their object files
/// are linked.
pub fn load_core(project: &Project, prog: &Program) -> io::Result<Core> {
    match prog.image() {
        Some(image) => {
            let path = image.resolve(project.root());
            let mut core = Core::new(prog.capacity().unwrap_or(DEFAULT_CAPACITY))?;
            let mut file = BufReader::new(fs::File::open(&path)?);

            core.install(&mut file)?;
            Ok(core)
        }
        None if prog.iter_objects().next().is_some() => link_program(project, prog),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Did not specify an image or any object files",
        )),
    }
}

/// Apply `--register` assignments from the command line.
pub fn apply_registers(core: &mut Core, argv: &ArgMatches) -> io::Result<()> {
    for text in argv.values_of("register").into_iter().flatten() {
        let (index, value) = parse_register_assignment(text).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid register assignment {}", text),
            )
        })?;

        core.register_mut(index).set_address(value);
    }

    Ok(())
}

/// Write a core's state out to an image file.
pub fn dump_core(core: &Core, path: &Path) -> io::Result<()> {
    let mut file = BufWriter::new(fs::File::create(path)?);
    core.dump(&mut file)?;
    file.flush()?;
    log::info!("Wrote image to {}", path.display());

    Ok(())
}

/// Run a core until it halts or a step limit is reached, calling `observe`
/// after every instruction.
pub fn execute<F>(core: &mut Core, max_steps: Option<u64>, mut observe: F) -> io::Result<u64>
where
    F: FnMut(&Core, &Operation),
{
    let mut steps = 0;

    while core.keep_executing() {
        if let Some(max) = max_steps {
            if steps >= max {
                log::warn!("Stopped after {} steps without terminating", steps);
                break;
            }
        }

        let op = core.step().map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Fault at ${:06X}: {}", core.instruction_address(), e),
            )
        })?;
        observe(core, &op);
        steps += 1;
    }

    Ok(steps)
}
