//! LEDC-style PWM natives
//!
//! All of these return the driver's success flag as a boolean.

use lodestone_hal::Board;

use super::pin::pin_arg;
use super::{Context, NativeResult};
use crate::engine::{int_arg, Engine};
use crate::value::Value;

/// `ledcAttach(pin, freq, resolution)`
pub fn attach<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx.board.pwm().attach(pin, int_arg(args, 1, 0), int_arg(args, 2, 0));
    Ok(Value::Bool(ok))
}

/// `ledcWrite(pin, duty)`
pub fn write<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx.board.pwm().write(pin, int_arg(args, 1, 0));
    Ok(Value::Bool(ok))
}

/// `ledcWriteTone(pin, freq)`
pub fn write_tone<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx.board.pwm().write_tone(pin, int_arg(args, 1, 0));
    Ok(Value::Bool(ok))
}

/// `ledcFade(pin, startDuty, targetDuty, maxFadeTimeMs)`
pub fn fade<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx
        .board
        .pwm()
        .fade(pin, int_arg(args, 1, 0), int_arg(args, 2, 0), int_arg(args, 3, 0));
    Ok(Value::Bool(ok))
}

/// `ledcChangeFrequency(pin, freq, resolution)`
pub fn change_frequency<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx
        .board
        .pwm()
        .change_frequency(pin, int_arg(args, 1, 0), int_arg(args, 2, 0));
    Ok(Value::Bool(ok))
}

/// `ledcDetach(pin)`
pub fn detach<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    let pin = pin_arg(args, 0, 0);
    let ok = ctx.board.pwm().detach(pin);
    if !ok {
        warn!("ledcDetach: pin {=i32} was not attached", pin);
    }
    Ok(Value::Bool(ok))
}
