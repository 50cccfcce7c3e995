//! Run-then-report loop
//!
//! The shell owns the fault reporter. Each script run ends in one of three
//! ways: it completes, it calls `exit()`, or an exception escapes. Only
//! the last is shown to the user, and only once.

use lodestone_core::{BridgeState, Exception, FaultReporter, Outcome};
use lodestone_display::DisplayBackend;
use lodestone_hal::{AnyKey, Clock, Volumes};

use crate::command::{parse_line, Command};
use crate::error::ShellError;
use crate::loader::{load_script_file, read_script};

/// Name given to scripts streamed over the transport
pub const BUFFER_SCRIPT_NAME: &str = "<buffer>";

/// The engine side of a script run
pub trait ScriptHost {
    /// Run `source` to completion
    ///
    /// Returns the exception that escaped the script, if any, already
    /// copied out of the engine.
    fn run(&mut self, name: &str, source: &str) -> Result<(), Exception>;
}

/// Result of one shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Execution {
    /// Nothing to do
    Idle,
    /// `exit` was requested; the host should stop its interpreter
    ExitRequested,
    /// Script ran to completion
    Completed,
    /// Script called `exit()`
    Exited,
    /// An exception escaped and was acknowledged by the user
    Faulted,
}

pub struct Shell<D, W, K, C> {
    reporter: FaultReporter<D, W, K, C>,
    exit_requested: bool,
    runs: u32,
}

impl<D, W, K, C> Shell<D, W, K, C>
where
    D: DisplayBackend,
    W: embedded_io::Write,
    K: AnyKey,
    C: Clock,
{
    pub fn new(reporter: FaultReporter<D, W, K, C>) -> Self {
        Self {
            reporter,
            exit_requested: false,
            runs: 0,
        }
    }

    /// Whether `exit` has been requested since the last run started
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Scripts started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn reporter(&self) -> &FaultReporter<D, W, K, C> {
        &self.reporter
    }

    pub fn release(self) -> FaultReporter<D, W, K, C> {
        self.reporter
    }

    /// Parse and execute one command line
    ///
    /// Returns `None` if the line is not a script command.
    pub fn handle_line<H, V, T>(
        &mut self,
        line: &str,
        host: &mut H,
        volumes: &mut V,
        transport: &mut T,
        state: &BridgeState,
    ) -> Option<Result<Execution, ShellError>>
    where
        H: ScriptHost + ?Sized,
        V: Volumes + ?Sized,
        T: embedded_io::Read,
    {
        let command = match parse_line(line)? {
            Ok(command) => command,
            Err(err) => return Some(Err(err)),
        };
        Some(self.execute(&command, host, volumes, transport, state))
    }

    /// Execute a parsed command
    pub fn execute<H, V, T>(
        &mut self,
        command: &Command,
        host: &mut H,
        volumes: &mut V,
        transport: &mut T,
        state: &BridgeState,
    ) -> Result<Execution, ShellError>
    where
        H: ScriptHost + ?Sized,
        V: Volumes + ?Sized,
        T: embedded_io::Read,
    {
        match command {
            Command::Nothing => Ok(Execution::Idle),
            Command::Exit => {
                self.exit_requested = true;
                Ok(Execution::ExitRequested)
            }
            Command::RunFromFile(path) => {
                let (_backend, source) = load_script_file(volumes, path)?;
                info!("running {=str} from {=str}", path.as_str(), _backend.name());
                Ok(self.run(host, path, &source, state))
            }
            Command::RunFromBuffer(len) => {
                let source = read_script(transport, *len)?;
                info!("running {=usize} byte script from transport", *len);
                Ok(self.run(host, BUFFER_SCRIPT_NAME, &source, state))
            }
        }
    }

    fn run<H: ScriptHost + ?Sized>(&mut self, host: &mut H, name: &str, source: &str, state: &BridgeState) -> Execution {
        self.exit_requested = false;
        self.runs += 1;
        match host.run(name, source) {
            Ok(()) => Execution::Completed,
            Err(exception) => match self.reporter.report(&state.touch_bus, &exception) {
                Outcome::Suppressed => Execution::Exited,
                Outcome::Acknowledged => Execution::Faulted,
            },
        }
    }
}
