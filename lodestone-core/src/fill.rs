//! Range fill over byte views and indexable objects
//!
//! Views are written straight into their backing store with a single
//! encoded element copied across the range. Anything else goes through
//! the engine's ordinary indexed-set path one element at a time.

use core::ops::Range;

use crate::buffer::data_view;
use crate::engine::{arg, Engine};
use crate::error::BridgeError;
use crate::value::{wrap_to_bits, ObjectClass, ObjectRef, Value, ViewKind};

/// Largest element count a fill will consider
pub const MAX_FILL_LEN: usize = i32::MAX as usize;

enum Target {
    View(ObjectRef, ViewKind),
    Generic(ObjectRef),
}

/// `fill(value, start = 0, end = length)`, returning the receiver
pub fn fill<E: Engine + ?Sized>(engine: &mut E, this: &Value, args: &[Value]) -> Result<Value, BridgeError> {
    let target = resolve_target(engine, this)?;

    let len = match target {
        Target::View(view, ViewKind::Raw) => element_count(engine, view, "byteLength")?,
        Target::View(view, ViewKind::Typed(_)) => element_count(engine, view, "length")?,
        Target::Generic(obj) => element_count(engine, obj, "length")?,
    };
    let start = optional_number(engine, arg(args, 1));
    let end = optional_number(engine, arg(args, 2));
    let Some(range) = resolve_range(len, start, end) else {
        return Ok(this.clone());
    };

    match target {
        Target::View(view, kind) => {
            let value = coerce_fill_value(engine, arg(args, 0));
            fill_view(engine, view, kind, len, range, value)?;
        }
        Target::Generic(obj) => {
            let value = arg(args, 0).clone();
            for index in range {
                engine.set_index(obj, index as u32, value.clone())?;
            }
        }
    }
    Ok(this.clone())
}

fn resolve_target<E: Engine + ?Sized>(engine: &mut E, this: &Value) -> Result<Target, BridgeError> {
    match this {
        Value::View(view) => {
            let kind = engine
                .view_kind(*view)
                .ok_or_else(|| BridgeError::internal("fill(): view has no element type"))?;
            Ok(Target::View(*view, kind))
        }
        Value::Object(obj) if engine.class_of(*obj) == ObjectClass::Buffer => {
            let view = data_view(engine, *obj)?;
            let kind = engine
                .view_kind(view)
                .ok_or_else(|| BridgeError::internal("fill(): Buffer data is not a view"))?;
            Ok(Target::View(view, kind))
        }
        Value::Object(obj) => Ok(Target::Generic(*obj)),
        _ => Err(BridgeError::type_mismatch("fill(): receiver is not an object")),
    }
}

fn element_count<E: Engine + ?Sized>(engine: &mut E, obj: ObjectRef, key: &str) -> Result<usize, BridgeError> {
    match engine.get(obj, key) {
        Value::Number(n) => Ok(clamp_length(n)),
        _ => Err(BridgeError::type_mismatch("fill(): receiver has no numeric length")),
    }
}

fn clamp_length(n: f64) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= MAX_FILL_LEN as f64 {
        MAX_FILL_LEN
    } else {
        n as usize
    }
}

fn optional_number<E: Engine + ?Sized>(engine: &mut E, value: &Value) -> Option<f64> {
    match value {
        Value::Undefined => None,
        Value::Number(n) => Some(*n),
        other => Some(engine.to_number(other)),
    }
}

/// Numeric value written into views
///
/// Booleans become 1/0; `null`, `undefined` and NaN become 0.
pub fn coerce_fill_value<E: Engine + ?Sized>(engine: &mut E, value: &Value) -> f64 {
    let n = match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Undefined | Value::Null => 0.0,
        Value::Number(n) => *n,
        other => engine.to_number(other),
    };
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

/// Clamp `start`/`end` against `len` the way `Array.prototype.fill` does
///
/// Missing or NaN bounds take their defaults (0 and `len`); negative bounds
/// count from the end. Returns `None` when the range is empty.
pub fn resolve_range(len: usize, start: Option<f64>, end: Option<f64>) -> Option<Range<usize>> {
    let len = len.min(MAX_FILL_LEN) as i64;
    let start = resolve_bound(start, 0, len);
    let end = resolve_bound(end, len, len);
    (end > start).then_some(start as usize..end as usize)
}

fn resolve_bound(bound: Option<f64>, default: i64, len: i64) -> i64 {
    let Some(bound) = bound.filter(|b| !b.is_nan()) else {
        return default;
    };
    let index = bound.clamp(-(len as f64), len as f64) as i64;
    let index = if index < 0 { index + len } else { index };
    index.clamp(0, len)
}

fn fill_view<E: Engine + ?Sized>(
    engine: &mut E,
    view: ObjectRef,
    kind: ViewKind,
    len: usize,
    range: Range<usize>,
    value: f64,
) -> Result<(), BridgeError> {
    let width = kind.element_width();
    let mut element = [0u8; 8];
    match kind {
        ViewKind::Raw => element[0] = wrap_to_bits(value, 8) as u8,
        ViewKind::Typed(ty) => ty.encode(value, &mut element[..width]),
    }

    let store = engine
        .backing_store(view)
        .ok_or_else(|| BridgeError::internal("fill(): missing backing store"))?;
    let declared = len
        .checked_mul(width)
        .ok_or_else(|| BridgeError::internal("fill(): length overflow"))?;
    if declared > store.len() {
        error!("fill: declared {=usize} bytes, store has {=usize}", declared, store.len());
        return Err(BridgeError::internal("fill(): length exceeds backing store"));
    }

    let bytes = &mut store[range.start * width..range.end * width];
    if width == 1 {
        bytes.fill(element[0]);
    } else {
        for slot in bytes.chunks_exact_mut(width) {
            slot.copy_from_slice(&element[..width]);
        }
    }
    Ok(())
}
