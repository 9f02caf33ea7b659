//! Implementations of processor architectures.
//!
//! Each architecture lives in a child module laid out the same way: `types`
//! for the architectural constants, `instr` for the decoded instruction
//! model, `dis` and `enc` for the binary codec, and `exec` for the semantics
//! of each instruction against a `Core`.

pub mod cisc0;
