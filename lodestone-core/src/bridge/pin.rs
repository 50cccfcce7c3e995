//! Pin argument parsing
//!
//! Pins are given as numbers or as board labels `"G<digits>"`. Labels are
//! parsed permissively: `"Gxyz"` reads as pin 0 and no range check is made.
//! That matches deployed scripts; callers that care must validate the
//! number themselves.

use lodestone_hal::PinNumber;

use crate::engine::arg;
use crate::value::{to_int32, Value};

/// Pin number for argument `i`, or `default` if it is neither a number nor a `G` label
pub fn pin_arg(args: &[Value], i: usize, default: PinNumber) -> PinNumber {
    match arg(args, i) {
        Value::Number(n) => to_int32(*n),
        Value::String(s) => parse_label(s).unwrap_or(default),
        _ => default,
    }
}

/// Parse a `G<digits>` label
///
/// Returns `None` only if the label does not start with `G`.
pub fn parse_label(label: &str) -> Option<PinNumber> {
    label.strip_prefix('G').map(leading_int)
}

/// C `atoi`: optional whitespace and sign, then digits up to the first non-digit
fn leading_int(s: &str) -> i32 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.wrapping_mul(10).wrapping_add(i32::from(d - b'0')));
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}
