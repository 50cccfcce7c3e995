//! `gpio` natives: digital, analog, touch and DAC

use lodestone_hal::{Board, PinMode};

use super::pin::pin_arg;
use super::{Context, NativeResult};
use crate::engine::{arg, int_arg, Engine};
use crate::error::BridgeError;
use crate::value::{ObjectClass, Value};

/// `pinMode(pin, mode = INPUT, pull?)`
///
/// `mode` is a numeric mode code, `"input"`/`"analog"` (with `pull` of
/// `"up"` or `"down"`), or any string starting with `"output"`.
pub fn pin_mode<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, -1);
    if pin < 0 {
        return Err(BridgeError::invalid_argument("gpio.pinMode(): invalid pin"));
    }
    let mode = match arg(args, 1) {
        Value::Number(_) => {
            let code = int_arg(args, 1, PinMode::Input.code());
            PinMode::from_code(code).ok_or_else(|| BridgeError::invalid_argument("gpio.pinMode(): unknown mode"))?
        }
        Value::String(name) => parse_mode_name(name, arg(args, 2).as_str()),
        _ => PinMode::Input,
    };
    debug!("pinMode {=i32} {}", pin, mode);
    ctx.board.gpio().pin_mode(pin, mode);
    Ok(Value::Undefined)
}

fn parse_mode_name(name: &str, pull: Option<&str>) -> PinMode {
    match name {
        "input" | "analog" => match pull {
            Some("up") => PinMode::InputPullUp,
            Some("down") => PinMode::InputPullDown,
            _ => PinMode::Input,
        },
        _ if name.starts_with("output") => PinMode::Output,
        _ => PinMode::Input,
    }
}

/// `digitalWrite(pin, value)`; any truthy value drives the pin high
pub fn digital_write<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let high = arg(args, 1).truthy();
    ctx.board.gpio().digital_write(pin, high);
    Ok(Value::Undefined)
}

/// `digitalRead(pin)` -> 0 | 1
pub fn digital_read<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let level = ctx.board.gpio().digital_read(pin);
    Ok(Value::from(i32::from(level)))
}

/// `analogRead(pin)`; configures the ADC on first use
pub fn analog_read<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let board = &mut *ctx.board;
    if ctx.state.adc.ensure(|| board.analog().configure_adc()) {
        info!("ADC configured");
    }
    Ok(Value::from(board.analog().analog_read(pin)))
}

pub fn analog_write<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    ctx.board.analog().analog_write(pin, int_arg(args, 1, 0));
    Ok(Value::Undefined)
}

pub fn analog_write_resolution<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    ctx.board.analog().analog_write_resolution(pin, int_arg(args, 1, 0));
    Ok(Value::Undefined)
}

pub fn analog_write_frequency<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    ctx.board.analog().analog_write_frequency(pin, int_arg(args, 1, 0));
    Ok(Value::Undefined)
}

/// `touchRead(pin)`; unsupported on boards without a touch peripheral
pub fn touch_read<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    match ctx.board.touch() {
        Some(touch) => Ok(Value::from(touch.touch_read(pin))),
        None => Err(BridgeError::unsupported("gpio.touchRead()")),
    }
}

/// `dacWrite(pin, value)`; unsupported on boards without a DAC
pub fn dac_write<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let value = int_arg(args, 1, 0);
    match ctx.board.dac() {
        Some(dac) => {
            dac.dac_write(pin, value);
            Ok(Value::Undefined)
        }
        None => Err(BridgeError::unsupported("gpio.dacWrite()")),
    }
}

/// `pins()` -> `{ grove_sda, grove_scl, ... }`
pub fn pins<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, _args: &[Value]) -> NativeResult {
    let obj = ctx.engine.new_object(ObjectClass::Plain)?;
    for (name, pin) in ctx.config.pins.entries() {
        ctx.engine.set(obj, name, Value::from(pin))?;
    }
    Ok(Value::Object(obj))
}
