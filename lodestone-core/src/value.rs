//! Dynamic values at the native boundary
//!
//! The engine owns every object; the bridge only sees [`ObjectRef`]
//! handles that are valid for the duration of one native call.

use alloc::string::String;

/// Opaque handle to an engine-owned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObjectRef(pub u32);

/// A script value, borrowed from the engine for one call
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Any non-view object: plain object, array, Buffer, error, function
    Object(ObjectRef),
    /// Raw or typed byte view
    View(ObjectRef),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Object handle for objects and views alike
    pub fn as_object(&self) -> Option<ObjectRef> {
        match self {
            Value::Object(obj) | Value::View(obj) => Some(*obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Script truthiness
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::View(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

/// Class of a non-view object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectClass {
    Plain,
    Array,
    /// Wraps one raw view in `_data` and caches its `length`
    Buffer,
    Error,
    Function,
}

/// Element interpretation of a typed view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementType {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ElementType {
    /// Element width in bytes
    pub const fn width(self) -> usize {
        match self {
            ElementType::Int8 | ElementType::Uint8 | ElementType::Uint8Clamped => 1,
            ElementType::Int16 | ElementType::Uint16 => 2,
            ElementType::Int32 | ElementType::Uint32 | ElementType::Float32 => 4,
            ElementType::Float64 => 8,
        }
    }

    /// Store `value` little-endian into `out`, which is exactly one element
    ///
    /// Integer widths truncate toward zero and wrap; the clamped type
    /// saturates to 0..=255 and rounds half to even.
    pub fn encode(self, value: f64, out: &mut [u8]) {
        match self {
            ElementType::Int8 | ElementType::Uint8 => out[0] = wrap_to_bits(value, 8) as u8,
            ElementType::Uint8Clamped => out[0] = clamp_to_u8(value),
            ElementType::Int16 | ElementType::Uint16 => {
                out.copy_from_slice(&(wrap_to_bits(value, 16) as u16).to_le_bytes())
            }
            ElementType::Int32 | ElementType::Uint32 => {
                out.copy_from_slice(&(wrap_to_bits(value, 32) as u32).to_le_bytes())
            }
            ElementType::Float32 => out.copy_from_slice(&(value as f32).to_le_bytes()),
            ElementType::Float64 => out.copy_from_slice(&value.to_le_bytes()),
        }
    }
}

/// Shape of a byte view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewKind {
    /// Untyped bytes (`ArrayBuffer`, `DataView`)
    Raw,
    Typed(ElementType),
}

impl ViewKind {
    pub const fn element_width(self) -> usize {
        match self {
            ViewKind::Raw => 1,
            ViewKind::Typed(ty) => ty.width(),
        }
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Truncate toward zero and reduce modulo `2^bits`
///
/// Non-finite input yields 0.
pub fn wrap_to_bits(value: f64, bits: u32) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = if value > -TWO_POW_63 && value < TWO_POW_63 {
        (value as i64) as u64
    } else {
        // |value| >= 2^63 is an integer; take the low 64 bits of it
        let raw = value.to_bits();
        let exponent = ((raw >> 52) & 0x7FF) as i32 - 1075;
        let mantissa = (raw & ((1u64 << 52) - 1)) | (1u64 << 52);
        let magnitude = if exponent >= 64 { 0 } else { mantissa << exponent };
        if value < 0.0 {
            magnitude.wrapping_neg()
        } else {
            magnitude
        }
    };
    if bits >= 64 {
        wrapped
    } else {
        wrapped & ((1u64 << bits) - 1)
    }
}

/// Script `ToInt32`
pub fn to_int32(value: f64) -> i32 {
    wrap_to_bits(value, 32) as u32 as i32
}

/// Saturate to 0..=255, rounding half to even
pub fn clamp_to_u8(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= 255.0 {
        return 255;
    }
    let floor = value as u32;
    let frac = value - floor as f64;
    let rounded = if frac > 0.5 || (frac == 0.5 && floor % 2 == 1) {
        floor + 1
    } else {
        floor
    };
    rounded as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy() {
        assert!(!Value::Undefined.truthy());
        assert!(!Value::Number(f64::NAN).truthy());
        assert!(!Value::from("").truthy());
        assert!(Value::from("0").truthy());
        assert!(Value::Object(ObjectRef(1)).truthy());
    }

    #[test]
    fn test_wrap_to_bits() {
        assert_eq!(wrap_to_bits(0x1FF as f64, 8), 0xFF);
        assert_eq!(wrap_to_bits(-1.0, 8), 0xFF);
        assert_eq!(wrap_to_bits(-1.9, 16), 0xFFFF);
        assert_eq!(wrap_to_bits(2.9, 8), 2);
        assert_eq!(wrap_to_bits(f64::INFINITY, 32), 0);
        assert_eq!(wrap_to_bits(f64::NAN, 32), 0);
        // 2^64 + 2^12 keeps only the low bits
        assert_eq!(wrap_to_bits(18_446_744_073_709_555_712.0, 32), 4096);
        assert_eq!(wrap_to_bits(-TWO_POW_63, 64), 1u64 << 63);
    }

    #[test]
    fn test_to_int32() {
        assert_eq!(to_int32(4_294_967_295.0), -1);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(-3.7), -3);
    }

    #[test]
    fn test_clamp_to_u8() {
        assert_eq!(clamp_to_u8(-5.0), 0);
        assert_eq!(clamp_to_u8(300.0), 255);
        assert_eq!(clamp_to_u8(f64::INFINITY), 255);
        assert_eq!(clamp_to_u8(f64::NEG_INFINITY), 0);
        assert_eq!(clamp_to_u8(1.5), 2);
        assert_eq!(clamp_to_u8(2.5), 2);
        assert_eq!(clamp_to_u8(2.6), 3);
        assert_eq!(clamp_to_u8(254.5), 254);
    }

    #[test]
    fn test_encode_little_endian() {
        let mut out = [0u8; 2];
        ElementType::Uint16.encode(0x1234 as f64, &mut out);
        assert_eq!(out, [0x34, 0x12]);

        let mut out = [0u8; 4];
        ElementType::Int32.encode(-2.0, &mut out);
        assert_eq!(out, [0xFE, 0xFF, 0xFF, 0xFF]);

        let mut out = [0u8; 8];
        ElementType::Float64.encode(1.0, &mut out);
        assert_eq!(out, 1.0f64.to_le_bytes());
    }
}
