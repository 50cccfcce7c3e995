//! Script runner command
//!
//! The serial shell exposes one command under the names `js`,
//! `run`, `interpret` and `interpreter`:
//!
//! ```text
//! js exit                      stop the running script
//! js run_from_file <path>      run a script file
//! js run_from_buffer <bytes>   run a script streamed over the transport
//! js <path>                    shorthand for run_from_file
//! ```
//!
//! Script files are looked up on the removable card first when it is
//! mounted and holds the path, else on onboard flash. Exceptions that
//! escape a script are handed to the fault reporter exactly once.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod command;
pub mod error;
pub mod loader;
pub mod shell;

pub use command::{parse_command, parse_line, Command, COMMAND_NAMES};
pub use error::ShellError;
pub use loader::{load_script_file, read_script, MAX_SCRIPT_LEN, TRAILER_LEN};
pub use shell::{Execution, ScriptHost, Shell};
