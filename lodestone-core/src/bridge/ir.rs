//! `ir` natives: transmit from file, transmit a code, timed receive

use alloc::string::String;

use lodestone_hal::{Board, CaptureMode};

use super::{Context, NativeResult};
use crate::engine::{arg, int_arg, str_arg, Engine};
use crate::error::BridgeError;
use crate::locator::{read_file, resolve_path, LocateOptions};
use crate::value::Value;

/// Largest signal file `transmitFile` will load
pub const MAX_SIGNAL_FILE_LEN: usize = 32 * 1024;

/// `irTransmitFile(path, hideDefaultUI = false)`
///
/// Accepts the legacy `("sd", path)` form. Returns `false` if the file is
/// missing or unreadable, else the transmitter's result.
pub fn transmit_file<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    if !matches!(arg(args, 0), Value::String(_) | Value::Object(_)) {
        return Err(BridgeError::type_mismatch("irTransmitFile(filename:string) required"));
    }
    let opts = LocateOptions {
        legacy_fs_first: true,
        check_exists: true,
    };
    let location = resolve_path(ctx.engine, ctx.board.volumes(), args, opts);
    let hide_ui = matches!(arg(args, location.consumed), Value::Bool(true));

    if !location.existed {
        warn!("irTransmitFile: {=str} not found", location.path.as_str());
        return Ok(Value::Bool(false));
    }
    let data = match read_file(ctx.board.volumes(), location.backend, &location.path, MAX_SIGNAL_FILE_LEN) {
        Ok(data) => data,
        Err(_) => {
            warn!("irTransmitFile: cannot read {=str}", location.path.as_str());
            return Ok(Value::Bool(false));
        }
    };
    Ok(Value::Bool(ctx.board.infrared().transmit_buffer(&data, hide_ui)))
}

/// `irTransmit(data, protocol = "NEC", bits = 32)`
pub fn transmit<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let Some(data) = str_arg(args, 0) else {
        return Err(BridgeError::type_mismatch("irTransmit(data:string,protocol?:string,bits?:int) required"));
    };
    let protocol = str_arg(args, 1).unwrap_or(ctx.config.ir.protocol.as_str());
    let bits = int_arg(args, 2, ctx.config.ir.bits);
    Ok(Value::Bool(ctx.board.infrared().transmit_code(protocol, data, bits)))
}

/// `irRead(timeoutSeconds = 10)` -> decoded signal text, or `""` on timeout
pub fn read<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    receive(ctx, args, CaptureMode::Decoded)
}

/// `irReadRaw(timeoutSeconds = 10)` -> raw timings text, or `""` on timeout
pub fn read_raw<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    receive(ctx, args, CaptureMode::Raw)
}

fn receive<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, args: &[Value], mode: CaptureMode) -> NativeResult {
    let timeout_s = int_arg(args, 0, ctx.config.ir.receive_timeout_s);
    let timeout_ms = u64::from(timeout_s.max(0).unsigned_abs()) * 1000;
    let poll_ms = ctx.config.ir.poll_interval_ms.max(1);
    let text = capture(ctx.board, mode, timeout_ms, poll_ms);
    Ok(Value::String(text))
}

/// Poll the receiver until a signal arrives or `timeout_ms` elapses
///
/// The receiver is polled at least once. Each delay is clamped to the time
/// remaining, and the number of polls is bounded independently of the clock.
pub fn capture<B: Board + ?Sized>(board: &mut B, mode: CaptureMode, timeout_ms: u64, poll_ms: u32) -> String {
    let poll_ms = poll_ms.max(1);
    let max_polls = timeout_ms / u64::from(poll_ms) + 1;
    let mut out = String::new();

    board.infrared().begin_capture(mode);
    let start = board.clock().now_ms();
    let mut polls = 0u64;
    let found = loop {
        polls += 1;
        if board.infrared().poll_capture(&mut out) {
            break true;
        }
        out.clear();
        let elapsed = board.clock().now_ms().saturating_sub(start);
        if elapsed >= timeout_ms || polls >= max_polls {
            break false;
        }
        let remaining = timeout_ms - elapsed;
        board.clock().delay_ms(remaining.min(u64::from(poll_ms)) as u32);
    };
    board.infrared().end_capture();

    if found {
        debug!("ir capture after {=u64} polls", polls);
    }
    out
}
