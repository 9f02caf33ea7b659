//! Project configuration file representation

use crate::project::program::Program;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// In-memory representation of the current project configuration.
///
/// This file is typically read from a file named `cisc0.json`, and it
/// contains every program in the project, keyed and ordered by name.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Project {
    #[serde(default)]
    programs: BTreeMap<String, Program>,

    /// Directory that program paths are relative to.
    #[serde(skip)]
    root: PathBuf,
}

impl Project {
    pub fn read<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
        let filename = filename.as_ref();
        let project_file = fs::File::open(filename)?;
        let mut project: Self = serde_json::from_reader(project_file)?;

        for (name, prog) in project.programs.iter_mut() {
            if prog.as_name().is_none() {
                prog.set_name(name);
            }
        }

        project.root = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(project)
    }

    /// Read a project file, substituting an empty project if there isn't
    /// one.
    pub fn read_or_default<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
        match Self::read(&filename) {
            Ok(project) => Ok(project),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "Project file {} not found, using command line options only",
                    filename.as_ref().display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the program with the given name within the project.
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Get the project's default program, which is the first by name.
    pub fn default_program(&self) -> Option<(&String, &Program)> {
        self.programs.iter().next()
    }

    pub fn iter_programs(&self) -> impl Iterator<Item = (&str, &Program)> {
        self.programs.iter().map(|(k, v)| (k.as_str(), v))
    }
}
