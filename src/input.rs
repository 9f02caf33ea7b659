//! Input utility functions

use crate::arch::cisc0::{parse_register, Address, RegisterIndex};

/// Parse a number entered in by a user.
///
/// Numbers prefixed with `0x` or `$` are hexadecimal; anything else is
/// decimal. Underscores may be used as digit separators.
pub fn parse_number(text: &str) -> Option<Address> {
    let text = text.trim().replace('_', "");

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
    {
        return Address::from_str_radix(hex, 16).ok();
    }

    text.parse().ok()
}

/// Parse a register assignment of the form `name=value`, e.g. `sp=0x8000`.
pub fn parse_register_assignment(text: &str) -> Option<(RegisterIndex, Address)> {
    let mut pieces = text.splitn(2, '=');
    let register = parse_register(pieces.next()?.trim())?;
    let value = parse_number(pieces.next()?)?;

    Some((register, value))
}
