//! Character devices for the GetChar and PutChar instructions

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// A byte-oriented console attached to a core.
pub trait Console {
    /// Read one byte, or `None` at end of input.
    fn get_char(&mut self) -> io::Result<Option<u8>>;

    fn put_char(&mut self, byte: u8) -> io::Result<()>;
}

/// The process's standard input and output.
#[derive(Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn get_char(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0];

        match io::stdin().read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn put_char(&mut self, byte: u8) -> io::Result<()> {
        let mut out = io::stdout();

        out.write_all(&[byte])?;
        out.flush()
    }
}

/// An in-memory console: input is drained from a queue, output collected.
#[derive(Default, Debug, Clone)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    pub fn new(input: &[u8]) -> Self {
        BufferConsole {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl Console for BufferConsole {
    fn get_char(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn put_char(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);

        Ok(())
    }
}
