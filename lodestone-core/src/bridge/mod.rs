//! Hardware capability bridge
//!
//! Native functions the engine calls on behalf of a script. Each has the
//! signature [`NativeFn`]: it borrows the engine, the board and the shared
//! state for the length of one call, validates its arguments, and either
//! returns a value or a [`BridgeError`] the engine throws.
//!
//! Peripheral failures that a script may want to retry are reported as
//! `false` return values, never as errors.

pub mod console;
pub mod gpio;
pub mod ir;
pub mod pin;
pub mod pwm;

use alloc::vec::Vec;

use lodestone_hal::Board;

use crate::buffer;
use crate::config::BridgeConfig;
use crate::engine::Engine;
use crate::error::BridgeError;
use crate::fill;
use crate::lazy::BridgeState;
use crate::value::Value;

/// Result of a native call
pub type NativeResult = Result<Value, BridgeError>;

/// A native function as the engine sees it: `(context, this, args)`
pub type NativeFn<E, B> = fn(&mut Context<'_, E, B>, &Value, &[Value]) -> NativeResult;

/// Everything a native call may touch
pub struct Context<'a, E: ?Sized, B: ?Sized> {
    pub engine: &'a mut E,
    pub board: &'a mut B,
    pub config: &'a BridgeConfig,
    pub state: &'a BridgeState,
}

impl<'a, E: Engine + ?Sized, B: Board + ?Sized> Context<'a, E, B> {
    pub fn new(engine: &'a mut E, board: &'a mut B, config: &'a BridgeConfig, state: &'a BridgeState) -> Self {
        Self { engine, board, config, state }
    }

    /// Invoke a native with this context
    pub fn call(&mut self, native: NativeFn<E, B>, this: &Value, args: &[Value]) -> NativeResult {
        native(self, this, args)
    }
}

/// One entry of the registration table
pub struct Native<E: ?Sized, B: ?Sized> {
    /// Object the function is installed on; empty for globals
    pub module: &'static str,
    pub name: &'static str,
    pub func: NativeFn<E, B>,
}

impl<E: ?Sized, B: ?Sized> Clone for Native<E, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized, B: ?Sized> Copy for Native<E, B> {}

impl<E: ?Sized, B: ?Sized> core::fmt::Debug for Native<E, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Native").field("module", &self.module).field("name", &self.name).finish()
    }
}

/// Registration table for an engine binding, in install order
pub fn natives<E: Engine + ?Sized, B: Board + ?Sized>() -> Vec<Native<E, B>> {
    let table: [(&'static str, &'static str, NativeFn<E, B>); 29] = [
        ("Buffer", "from", buffer_from),
        ("Buffer.prototype", "toString", buffer_to_string),
        ("Buffer.prototype", "fill", view_fill),
        ("TypedArray.prototype", "fill", view_fill),
        ("gpio", "pinMode", gpio::pin_mode),
        ("gpio", "digitalWrite", gpio::digital_write),
        ("gpio", "digitalRead", gpio::digital_read),
        ("gpio", "analogRead", gpio::analog_read),
        ("gpio", "analogWrite", gpio::analog_write),
        ("gpio", "analogWriteResolution", gpio::analog_write_resolution),
        ("gpio", "analogWriteFrequency", gpio::analog_write_frequency),
        ("gpio", "touchRead", gpio::touch_read),
        ("gpio", "dacWrite", gpio::dac_write),
        ("gpio", "pins", gpio::pins),
        ("gpio", "ledcAttach", pwm::attach),
        ("gpio", "ledcWrite", pwm::write),
        ("gpio", "ledcWriteTone", pwm::write_tone),
        ("gpio", "ledcFade", pwm::fade),
        ("gpio", "ledcChangeFrequency", pwm::change_frequency),
        ("gpio", "ledcDetach", pwm::detach),
        ("ir", "transmitFile", ir::transmit_file),
        ("ir", "transmit", ir::transmit),
        ("ir", "read", ir::read),
        ("ir", "readRaw", ir::read_raw),
        ("", "print", console::print),
        ("", "println", console::println),
        ("", "serialPrint", console::serial_print),
        ("", "serialPrintln", console::serial_println),
        ("", "exit", exit),
    ];
    table
        .into_iter()
        .map(|(module, name, func)| Native { module, name, func })
        .collect()
}

/// Look up one entry of [`natives`]
pub fn find_native<E: Engine + ?Sized, B: Board + ?Sized>(module: &str, name: &str) -> Option<NativeFn<E, B>> {
    natives::<E, B>()
        .into_iter()
        .find(|n| n.module == module && n.name == name)
        .map(|n| n.func)
}

fn buffer_from<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, _this: &Value, args: &[Value]) -> NativeResult {
    buffer::from(ctx.engine, args)
}

fn buffer_to_string<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, this: &Value, args: &[Value]) -> NativeResult {
    buffer::to_string(ctx.engine, this, args)
}

fn view_fill<E: Engine + ?Sized, B: Board + ?Sized>(ctx: &mut Context<'_, E, B>, this: &Value, args: &[Value]) -> NativeResult {
    fill::fill(ctx.engine, this, args)
}

/// `exit()`: unwind the script without reporting a fault
fn exit<E: Engine + ?Sized, B: Board + ?Sized>(_ctx: &mut Context<'_, E, B>, _this: &Value, _args: &[Value]) -> NativeResult {
    Err(BridgeError::script_exit())
}
