//! Console natives: `print`, `println`, `serialPrint`, `serialPrintln`

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use lodestone_hal::Board;

use super::{Context, NativeResult};
use crate::engine::Engine;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    DisplayAndSerial,
    SerialOnly,
}

/// `print(...args)` to display and serial
pub fn print<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    emit(ctx, args, Sink::DisplayAndSerial, false)
}

/// `println(...args)` to display and serial
pub fn println<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    emit(ctx, args, Sink::DisplayAndSerial, true)
}

/// `serialPrint(...args)` to serial only
pub fn serial_print<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    emit(ctx, args, Sink::SerialOnly, false)
}

/// `serialPrintln(...args)` to serial only
pub fn serial_println<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    emit(ctx, args, Sink::SerialOnly, true)
}

fn emit<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, args: &[Value], sink: Sink, newline: bool) -> NativeResult {
    let mut line = render_args(ctx.engine, args, ctx.config.console.max_args);
    if newline {
        line.push('\n');
    }
    // Output is best effort; a full or absent sink is not a script error
    if sink == Sink::DisplayAndSerial && ctx.config.console.print_to_display {
        let _ = ctx.board.display_text().write_str(&line);
    }
    let _ = ctx.board.serial_text().write_str(&line);
    Ok(Value::Undefined)
}

/// Join up to `max_args` arguments with single spaces
///
/// Stops at the first `undefined`.
pub fn render_args<E: Engine + ?Sized>(engine: &mut E, args: &[Value], max_args: usize) -> String {
    let mut line = String::new();
    for (i, value) in args.iter().take(max_args).enumerate() {
        if value.is_undefined() {
            break;
        }
        if i > 0 {
            line.push(' ');
        }
        match value {
            Value::Null => line.push_str("null"),
            Value::Bool(b) => line.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => {
                let _ = format_g(*n, &mut line);
            }
            Value::String(s) => line.push_str(s),
            other => {
                if let Some(text) = engine.to_string(other) {
                    line.push_str(&text);
                }
            }
        }
    }
    line
}

/// Format a number like C's `%g` (six significant digits)
pub fn format_g<W: Write + ?Sized>(value: f64, out: &mut W) -> core::fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value < 0.0 { "-inf" } else { "inf" });
    }
    if value == 0.0 {
        return out.write_str(if value.is_sign_negative() { "-0" } else { "0" });
    }

    let scientific = format!("{:.5e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(out, "{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs())
    } else {
        let precision = (5 - exponent) as usize;
        let fixed = format!("{:.*}", precision, value);
        out.write_str(trim_fraction(&fixed))
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
