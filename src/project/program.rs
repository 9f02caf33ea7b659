//! Program identifier

use crate::arch::cisc0::Address;
use crate::input::parse_number;
use clap::{App, Arg, ArgMatches, ArgSettings};
use relative_path::RelativePathBuf;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io;
use std::path::{Path, PathBuf};

/// A file a program refers to.
///
/// Paths written in the project file are relative to the project directory.
/// Paths typed on the command line are used exactly as given, so absolute
/// paths stay absolute and relative ones follow the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramPath {
    Project(RelativePathBuf),
    Command(PathBuf),
}

impl ProgramPath {
    /// Turn this path into one the filesystem can open.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        match self {
            ProgramPath::Project(path) => path.to_path(root),
            ProgramPath::Command(path) => path.clone(),
        }
    }
}

impl From<&str> for ProgramPath {
    fn from(path: &str) -> Self {
        ProgramPath::Command(PathBuf::from(path))
    }
}

impl Serialize for ProgramPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProgramPath::Project(path) => path.serialize(serializer),
            ProgramPath::Command(path) => serializer.collect_str(&path.display()),
        }
    }
}

impl<'de> Deserialize<'de> for ProgramPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RelativePathBuf::deserialize(deserializer).map(ProgramPath::Project)
    }
}

/// One runnable program within a project.
///
/// A program starts either from a raw image (`image`) or from a set of object
/// files which are linked together on load (`objects`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    #[serde(default)]
    image: Option<ProgramPath>,

    #[serde(default)]
    objects: Vec<ProgramPath>,

    #[serde(default)]
    capacity: Option<Address>,

    #[serde(default)]
    max_steps: Option<u64>,

    #[serde(default)]
    output: Option<ProgramPath>,

    #[serde(skip)]
    name: Option<String>,
}

fn invalid_number(what: &str, text: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Invalid {} {}", what, text),
    )
}

impl Program {
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .long("image")
                .value_name("program.img")
                .help("The binary image to load.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("capacity")
                .long("capacity")
                .value_name("0x1000000")
                .help("Memory capacity of the core, in words.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("max_steps")
                .long("max-steps")
                .value_name("1000000")
                .help("Stop after executing this many instructions.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Construct a Program from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> io::Result<Program> {
        let capacity = match args.value_of("capacity") {
            Some(text) => {
                Some(parse_number(text).ok_or_else(|| invalid_number("capacity", text))?)
            }
            None => None,
        };
        let max_steps = match args.value_of("max_steps") {
            Some(text) => Some(
                parse_number(text)
                    .map(u64::from)
                    .ok_or_else(|| invalid_number("step count", text))?,
            ),
            None => None,
        };

        Ok(Program {
            image: args.value_of("image").map(ProgramPath::from),
            objects: Vec::new(),
            capacity,
            max_steps,
            output: None,
            name: None,
        })
    }

    pub fn image(&self) -> Option<&ProgramPath> {
        self.image.as_ref()
    }

    pub fn iter_objects(&self) -> impl Iterator<Item = &ProgramPath> {
        self.objects.iter()
    }

    pub fn add_object_path(&mut self, path: &str) {
        self.objects.push(ProgramPath::from(path));
    }

    pub fn capacity(&self) -> Option<Address> {
        self.capacity
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    pub fn output(&self) -> Option<&ProgramPath> {
        self.output.as_ref()
    }

    pub fn as_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub fn apply_override(&self, other: &Program) -> Program {
        Program {
            image: other.image.clone().or_else(|| self.image.clone()),
            objects: match other.objects.len() {
                0 => self.objects.clone(),
                _ => other.objects.clone(),
            },
            capacity: other.capacity.or(self.capacity),
            max_steps: other.max_steps.or(self.max_steps),
            output: other.output.clone().or_else(|| self.output.clone()),
            name: other.name.clone().or_else(|| self.name.clone()),
        }
    }
}
