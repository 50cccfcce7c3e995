use core::convert::Infallible;

use lodestone_core::config::FaultTiming;
use lodestone_core::{BridgeError, BridgeState, Exception, FaultReporter};
use lodestone_display::{DisplayBackend, DisplayError, TextStyle};
use lodestone_hal::{AnyKey, Backend, Clock, FsError, OpenMode, Volumes};
use lodestone_shell::{parse_command, Command, Execution, ScriptHost, Shell, ShellError};

#[derive(Default)]
struct Display {
    renders: usize,
}

impl DisplayBackend for Display {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_text(&mut self, _row: u8, _col: u8, _text: &str, _style: TextStyle) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.renders += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (53, 30)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct Serial(Vec<u8>);

impl embedded_io::ErrorType for Serial {
    type Error = Infallible;
}

impl embedded_io::Write for Serial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Default)]
struct Keys {
    begun: usize,
}

impl AnyKey for Keys {
    fn begin(&mut self) {
        self.begun += 1;
    }

    fn any_key_pressed(&mut self) -> bool {
        true
    }
}

#[derive(Default)]
struct Ticks(u64);

impl Clock for Ticks {
    fn now_ms(&self) -> u64 {
        self.0
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0 += u64::from(ms);
    }
}

struct File(Vec<u8>);

impl embedded_io::ErrorType for File {
    type Error = Infallible;
}

impl embedded_io::Read for File {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = buf.len().min(self.0.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0.drain(..n);
        Ok(n)
    }
}

#[derive(Default)]
struct Disk {
    files: Vec<(Backend, &'static str, &'static [u8])>,
    card_mounted: bool,
}

impl Volumes for Disk {
    type File = File;

    fn is_mounted(&self, backend: Backend) -> bool {
        backend == Backend::Primary || self.card_mounted
    }

    fn exists(&mut self, backend: Backend, path: &str) -> bool {
        self.is_mounted(backend) && self.files.iter().any(|(b, p, _)| *b == backend && *p == path)
    }

    fn open(&mut self, backend: Backend, path: &str, _mode: OpenMode) -> Result<File, FsError> {
        self.files
            .iter()
            .find(|(b, p, _)| *b == backend && *p == path)
            .map(|(_, _, data)| File(data.to_vec()))
            .ok_or(FsError::NotFound)
    }
}

/// Records what it ran and throws whatever it was told to
#[derive(Default)]
struct Host {
    ran: Vec<(String, String)>,
    throw: Option<Exception>,
}

impl ScriptHost for Host {
    fn run(&mut self, name: &str, source: &str) -> Result<(), Exception> {
        self.ran.push((name.to_string(), source.to_string()));
        match self.throw.take() {
            Some(exception) => Err(exception),
            None => Ok(()),
        }
    }
}

type TestShell = Shell<Display, Serial, Keys, Ticks>;

fn shell() -> TestShell {
    Shell::new(FaultReporter::new(
        Display::default(),
        Serial::default(),
        Keys::default(),
        Ticks::default(),
        FaultTiming::default(),
    ))
}

fn boom() -> Exception {
    Exception::from_error(&BridgeError::invalid_argument("boom"))
}

#[test]
fn test_file_prefers_card() {
    let mut shell = shell();
    let mut host = Host::default();
    let mut disk = Disk {
        files: vec![
            (Backend::Primary, "/app.js", &b"flash()"[..]),
            (Backend::Removable, "/app.js", &b"card()"[..]),
        ],
        card_mounted: true,
    };
    let state = BridgeState::new();

    let result = shell.handle_line("js app.js", &mut host, &mut disk, &mut &b""[..], &state);

    assert_eq!(result, Some(Ok(Execution::Completed)));
    assert_eq!(host.ran, [("/app.js".to_string(), "card()".to_string())]);
}

#[test]
fn test_file_falls_back_to_flash() {
    let mut shell = shell();
    let mut host = Host::default();
    let mut disk = Disk {
        files: vec![
            (Backend::Primary, "/app.js", &b"flash()"[..]),
            (Backend::Removable, "/app.js", &b"card()"[..]),
        ],
        card_mounted: false,
    };
    let state = BridgeState::new();
    let command = parse_command(["run_from_file", "/app.js"]).unwrap();

    let result = shell.execute(&command, &mut host, &mut disk, &mut &b""[..], &state);

    assert_eq!(result, Ok(Execution::Completed));
    assert_eq!(host.ran[0].1, "flash()");
}

#[test]
fn test_missing_file() {
    let mut shell = shell();
    let mut host = Host::default();
    let state = BridgeState::new();

    let result = shell.execute(
        &Command::RunFromFile("/nope.js".into()),
        &mut host,
        &mut Disk::default(),
        &mut &b""[..],
        &state,
    );

    assert_eq!(result, Err(ShellError::ScriptNotFound));
    assert!(host.ran.is_empty());
    assert_eq!(shell.runs(), 0);
}

#[test]
fn test_run_from_buffer() {
    let mut shell = shell();
    let mut host = Host::default();
    let state = BridgeState::new();
    let mut transport: &[u8] = b"println(1)\r\n";

    let result = shell.handle_line("run run_from_buffer 10", &mut host, &mut Disk::default(), &mut transport, &state);

    assert_eq!(result, Some(Ok(Execution::Completed)));
    assert_eq!(host.ran, [("<buffer>".to_string(), "println(1)".to_string())]);
    assert!(transport.is_empty());
}

#[test]
fn test_exception_reported_once() {
    let mut shell = shell();
    let mut host = Host {
        throw: Some(boom()),
        ..Default::default()
    };
    let mut disk = Disk {
        files: vec![(Backend::Primary, "/bad.js", &b"throw 1"[..])],
        card_mounted: false,
    };
    let state = BridgeState::new();

    let first = shell.handle_line("js /bad.js", &mut host, &mut disk, &mut &b""[..], &state);
    let second = shell.handle_line("js /bad.js", &mut host, &mut disk, &mut &b""[..], &state);

    assert_eq!(first, Some(Ok(Execution::Faulted)));
    assert_eq!(second, Some(Ok(Execution::Completed)));
    assert_eq!(shell.reporter().renders(), 1);
    assert!(state.touch_bus.is_ready());

    let (display, serial, keys, _) = shell.release().release();
    assert_eq!(display.renders, 1);
    assert_eq!(keys.begun, 1);
    assert_eq!(String::from_utf8(serial.0).unwrap(), "boom\nError: boom\n");
}

#[test]
fn test_script_exit_not_reported() {
    let mut shell = shell();
    let mut host = Host {
        throw: Some(Exception::from_error(&BridgeError::script_exit())),
        ..Default::default()
    };
    let state = BridgeState::new();
    let mut transport: &[u8] = b"exit()\r\n";

    let result = shell.execute(&Command::RunFromBuffer(6), &mut host, &mut Disk::default(), &mut transport, &state);

    assert_eq!(result, Ok(Execution::Exited));
    assert_eq!(shell.reporter().renders(), 0);
}

#[test]
fn test_exit_command() {
    let mut shell = shell();
    let state = BridgeState::new();

    let result = shell.handle_line("interpret exit", &mut Host::default(), &mut Disk::default(), &mut &b""[..], &state);

    assert_eq!(result, Some(Ok(Execution::ExitRequested)));
    assert!(shell.exit_requested());
}

#[test]
fn test_other_commands_ignored() {
    let mut shell = shell();
    let state = BridgeState::new();
    let result = shell.handle_line("ls /", &mut Host::default(), &mut Disk::default(), &mut &b""[..], &state);
    assert_eq!(result, None);
}

#[test]
fn test_missing_path_argument() {
    let mut shell = shell();
    let state = BridgeState::new();
    let result = shell.handle_line("js run_from_file", &mut Host::default(), &mut Disk::default(), &mut &b""[..], &state);
    assert_eq!(result, Some(Err(ShellError::MissingArgument)));
}
