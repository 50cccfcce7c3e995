//! Script-visible `Buffer`
//!
//! A Buffer is a plain engine object of class [`ObjectClass::Buffer`]
//! holding one raw byte view under `_data` and its byte count under
//! `length`. The two are written together and never diverge.

use alloc::string::String;

use crate::engine::{arg, Engine};
use crate::error::BridgeError;
use crate::transcode::{decode_base64, encode_latin1_to_utf8};
use crate::value::{ObjectClass, ObjectRef, Value};

/// Property holding the wrapped byte view
pub const DATA_KEY: &str = "_data";

/// Property caching the byte count
pub const LENGTH_KEY: &str = "length";

/// Encodings accepted by `Buffer.from`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceEncoding {
    Utf8,
    Base64,
}

impl SourceEncoding {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "utf8" | "utf-8" => Some(SourceEncoding::Utf8),
            "base64" => Some(SourceEncoding::Base64),
            _ => None,
        }
    }
}

/// Encodings accepted by `Buffer.prototype.toString`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "utf8" | "utf-8" => Some(TextEncoding::Utf8),
            "binary" | "latin1" => Some(TextEncoding::Latin1),
            _ => None,
        }
    }
}

/// `Buffer.from(text, encoding = "utf8")`
pub fn from<E: Engine + ?Sized>(engine: &mut E, args: &[Value]) -> Result<Value, BridgeError> {
    let Value::String(text) = arg(args, 0) else {
        return Err(BridgeError::type_mismatch("Buffer.from(): argument must be a string"));
    };
    let encoding = match arg(args, 1) {
        Value::Undefined => SourceEncoding::Utf8,
        Value::String(name) => SourceEncoding::parse(name)
            .ok_or_else(|| BridgeError::type_mismatch("Buffer.from(): unsupported encoding"))?,
        _ => return Err(BridgeError::type_mismatch("Buffer.from(): encoding must be a string")),
    };

    match encoding {
        SourceEncoding::Utf8 => wrap_bytes(engine, text.as_bytes()),
        SourceEncoding::Base64 => {
            let bytes = decode_base64(text.as_bytes())?;
            wrap_bytes(engine, &bytes)
        }
    }
}

/// Copy `bytes` into a new Buffer
pub fn wrap_bytes<E: Engine + ?Sized>(engine: &mut E, bytes: &[u8]) -> Result<Value, BridgeError> {
    let view = engine.new_byte_view(bytes)?;
    let buffer = engine.new_object(ObjectClass::Buffer)?;
    engine.set(buffer, DATA_KEY, Value::View(view))?;
    engine.set(buffer, LENGTH_KEY, Value::Number(bytes.len() as f64))?;
    Ok(Value::Object(buffer))
}

/// `Buffer.prototype.toString(encoding = "utf8")`
pub fn to_string<E: Engine + ?Sized>(engine: &mut E, this: &Value, args: &[Value]) -> Result<Value, BridgeError> {
    let encoding = match arg(args, 0) {
        Value::Undefined => TextEncoding::Utf8,
        Value::String(name) => TextEncoding::parse(name)
            .ok_or_else(|| BridgeError::invalid_argument("Buffer.toString(): unsupported encoding"))?,
        _ => return Err(BridgeError::invalid_argument("Buffer.toString(): encoding must be a string")),
    };
    let buffer = match this {
        Value::Object(obj) if engine.class_of(*obj) == ObjectClass::Buffer => *obj,
        _ => return Err(BridgeError::invalid_argument("Buffer.toString(): receiver is not a Buffer")),
    };

    let view = data_view(engine, buffer)?;
    let cached = engine.get(buffer, LENGTH_KEY).as_number();
    let bytes = engine
        .backing_store(view)
        .ok_or_else(|| BridgeError::internal("Buffer.toString(): missing backing store"))?;
    if cached != Some(bytes.len() as f64) {
        return Err(BridgeError::internal("Buffer.toString(): length out of sync with data"));
    }

    let text = match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Latin1 => encode_latin1_to_utf8(bytes),
    };
    Ok(Value::String(text))
}

/// The raw view wrapped by a Buffer object
pub fn data_view<E: Engine + ?Sized>(engine: &mut E, buffer: ObjectRef) -> Result<ObjectRef, BridgeError> {
    match engine.get(buffer, DATA_KEY) {
        Value::View(view) => Ok(view),
        _ => Err(BridgeError::internal("Buffer has no byte view")),
    }
}
