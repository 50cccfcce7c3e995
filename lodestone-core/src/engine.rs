//! Script engine boundary
//!
//! The engine (parser, bytecode VM, garbage collector) is external. This
//! trait is the narrow surface the bridge needs from it; an engine binding
//! implements it once and installs the table from [`crate::bridge::natives`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::BridgeError;
use crate::value::{to_int32, ObjectClass, ObjectRef, Value, ViewKind};

/// Operations the bridge performs on engine-owned values
pub trait Engine {
    /// Class of a non-view object
    fn class_of(&self, obj: ObjectRef) -> ObjectClass;

    /// Shape of a byte view, `None` if `obj` is not a view
    fn view_kind(&self, obj: ObjectRef) -> Option<ViewKind>;

    /// Read a property; absent properties read as `Undefined`
    fn get(&mut self, obj: ObjectRef, key: &str) -> Value;

    /// Read an indexed element
    fn get_index(&mut self, obj: ObjectRef, index: u32) -> Value;

    /// Write a property
    fn set(&mut self, obj: ObjectRef, key: &str, value: Value) -> Result<(), BridgeError>;

    /// Write an indexed element through the ordinary property path
    fn set_index(&mut self, obj: ObjectRef, index: u32, value: Value) -> Result<(), BridgeError>;

    /// Own enumerable string keys, in insertion order
    fn own_keys(&mut self, obj: ObjectRef) -> Vec<String>;

    /// Allocate an empty object of the given class
    fn new_object(&mut self, class: ObjectClass) -> Result<ObjectRef, BridgeError>;

    /// Allocate an array of `len` undefined elements
    fn new_array(&mut self, len: u32) -> Result<ObjectRef, BridgeError>;

    /// Allocate a Uint8 view holding a copy of `bytes`
    fn new_byte_view(&mut self, bytes: &[u8]) -> Result<ObjectRef, BridgeError>;

    /// Borrow the backing store of a view
    ///
    /// The slice covers exactly the view's window and must not be kept
    /// past the current native call.
    fn backing_store(&mut self, view: ObjectRef) -> Option<&mut [u8]>;

    /// Script `ToNumber`
    fn to_number(&mut self, value: &Value) -> f64;

    /// Script `ToString`; `None` if conversion threw
    fn to_string(&mut self, value: &Value) -> Option<String>;
}

static UNDEFINED: Value = Value::Undefined;

/// Argument `i`, reading `Undefined` past the end
pub fn arg(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&UNDEFINED)
}

/// Integer argument, or `default` unless the argument is a number
pub fn int_arg(args: &[Value], i: usize, default: i32) -> i32 {
    match arg(args, i) {
        Value::Number(n) => to_int32(*n),
        _ => default,
    }
}

/// String argument; `None` unless the argument is a string
pub fn str_arg(args: &[Value], i: usize) -> Option<&str> {
    arg(args, i).as_str()
}
