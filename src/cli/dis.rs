//! Static disassembly command

use crate::arch::cisc0::disassemble;
use crate::cli::common::load_core;
use crate::input::parse_number;
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;

/// Display code starting at a given address.
///
/// Words that don't decode are listed as raw data and skipped one at a time,
/// so that the listing can resynchronize on the next valid instruction.
pub fn dis<'a>(project: &Project, prog: &Program, argv: &ArgMatches<'a>) -> io::Result<()> {
    let start = argv
        .value_of("start")
        .and_then(parse_number)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "Must specify a valid address to list",
            )
        })?;
    let count = match argv.value_of("count") {
        Some(text) => parse_number(text).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Invalid instruction count")
        })?,
        None => 16,
    };

    let core = load_core(project, prog)?;
    let words = core.memory().words();
    let mut address = start as usize;

    for _ in 0..count {
        if address >= words.len() {
            break;
        }

        match disassemble(&words[address..]) {
            Ok((op, len)) => {
                let raw: Vec<String> = words[address..address + len]
                    .iter()
                    .map(|w| format!("{:04X}", w))
                    .collect();

                println!("{:06X}: {:<15} {}", address, raw.join(" "), op);
                address += len;
            }
            Err(e) => {
                println!("{:06X}: {:04X}            .word ; {}", address, words[address], e);
                address += 1;
            }
        }
    }

    Ok(())
}
