//! Command parsing
//!
//! Arguments arrive already split by the serial CLI. The first one picks
//! the subcommand; anything that is not a known subcommand is a path.

use alloc::string::String;

use crate::error::ShellError;

/// Names the command is registered under
pub const COMMAND_NAMES: [&str; 4] = ["js", "run", "interpret", "interpreter"];

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No arguments, or only whitespace
    Nothing,
    /// Stop the running script
    Exit,
    /// Run the script at this absolute path
    RunFromFile(String),
    /// Read this many bytes (plus trailer) from the transport and run them
    RunFromBuffer(usize),
}

/// Parse the arguments that follow the command name
pub fn parse_command<'a, I>(args: I) -> Result<Command, ShellError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut args = args.into_iter();
    let first = match args.next().map(str::trim) {
        None | Some("") => return Ok(Command::Nothing),
        Some(first) => first,
    };

    match first {
        "exit" => Ok(Command::Exit),
        "run_from_buffer" => {
            let size = args.next().map(parse_size).unwrap_or(0);
            Ok(Command::RunFromBuffer(size))
        }
        "run_from_file" => {
            let path = args.next().ok_or(ShellError::MissingArgument)?;
            Ok(Command::RunFromFile(absolute_path(path)))
        }
        path => Ok(Command::RunFromFile(absolute_path(path))),
    }
}

/// Parse a full command line
///
/// Returns `None` if the line is not addressed to this command.
pub fn parse_line(line: &str) -> Option<Result<Command, ShellError>> {
    let mut words = line.split_ascii_whitespace();
    let name = words.next()?;
    if !COMMAND_NAMES.contains(&name) {
        return None;
    }
    Some(parse_command(words))
}

/// Trim and root a script path
fn absolute_path(path: &str) -> String {
    let path = path.trim();
    let mut out = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        out.push('/');
    }
    out.push_str(path);
    out
}

/// Leading decimal digits after optional whitespace and sign
///
/// Anything unparseable, and any negative count, reads as zero.
fn parse_size(s: &str) -> usize {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if negative {
        return 0;
    }
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0usize, |acc, d| acc.saturating_mul(10).saturating_add(usize::from(d - b'0')))
}
