//! Structured tree <-> dynamic value conversion
//!
//! Used for configuration and JSON exchange with scripts. Integers beyond
//! 2^53 lose precision on the way into the engine; that is the documented
//! boundary of a double-based number type.

use alloc::string::String;
use alloc::vec::Vec;

use crate::buffer::data_view;
use crate::engine::Engine;
use crate::error::BridgeError;
use crate::value::{ObjectClass, ObjectRef, Value};

/// Maximum nesting depth accepted in either direction
pub const MAX_DEPTH: usize = 32;

/// Maximum element count read from one script array
pub const MAX_LIST_LEN: u32 = 65_536;

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A structured value
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    String(String),
    List(Vec<Tree>),
    Map(TreeMap),
}

/// Ordered map with unique keys
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeMap {
    entries: Vec<(String, Tree)>,
}

impl TreeMap {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace, returning the previous value
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Tree) -> Option<Tree> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tree)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Tree)> for TreeMap {
    fn from_iter<I: IntoIterator<Item = (K, Tree)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Build an engine value from a tree
pub fn to_dynamic_value<E: Engine + ?Sized>(engine: &mut E, tree: &Tree) -> Result<Value, BridgeError> {
    build(engine, tree, 0)
}

fn build<E: Engine + ?Sized>(engine: &mut E, tree: &Tree, depth: usize) -> Result<Value, BridgeError> {
    if depth > MAX_DEPTH {
        return Err(BridgeError::invalid_argument("structure nested too deeply"));
    }
    Ok(match tree {
        Tree::Null => Value::Null,
        Tree::Bool(b) => Value::Bool(*b),
        Tree::Int(i) => Value::Number(*i as f64),
        Tree::UInt(u) => Value::Number(*u as f64),
        Tree::Double(d) => Value::Number(*d),
        Tree::String(s) => Value::String(s.clone()),
        Tree::List(items) => {
            let len = u32::try_from(items.len())
                .map_err(|_| BridgeError::invalid_argument("list too long"))?;
            let array = engine.new_array(len)?;
            for (index, item) in items.iter().enumerate() {
                let value = build(engine, item, depth + 1)?;
                engine.set_index(array, index as u32, value)?;
            }
            Value::Object(array)
        }
        Tree::Map(map) => {
            let obj = engine.new_object(ObjectClass::Plain)?;
            for (key, item) in map.iter() {
                let value = build(engine, item, depth + 1)?;
                engine.set(obj, key, value)?;
            }
            Value::Object(obj)
        }
    })
}

/// Read an engine value into a tree
///
/// A top-level `undefined` reads as null.
pub fn from_dynamic_value<E: Engine + ?Sized>(engine: &mut E, value: &Value) -> Result<Tree, BridgeError> {
    Ok(read(engine, value, 0)?.unwrap_or(Tree::Null))
}

/// `None` for values that have no tree form (`undefined`, functions)
fn read<E: Engine + ?Sized>(engine: &mut E, value: &Value, depth: usize) -> Result<Option<Tree>, BridgeError> {
    if depth > MAX_DEPTH {
        return Err(BridgeError::invalid_argument("structure nested too deeply"));
    }
    let tree = match value {
        Value::Undefined => return Ok(None),
        Value::Null => Tree::Null,
        Value::Bool(b) => Tree::Bool(*b),
        Value::Number(n) => number_tree(*n),
        Value::String(s) => Tree::String(s.clone()),
        Value::View(view) => byte_list(engine, *view)?,
        Value::Object(obj) => match engine.class_of(*obj) {
            ObjectClass::Function => return Ok(None),
            ObjectClass::Buffer => {
                let view = data_view(engine, *obj)?;
                byte_list(engine, view)?
            }
            ObjectClass::Array => read_list(engine, *obj, depth)?,
            ObjectClass::Plain | ObjectClass::Error => read_map(engine, *obj, depth)?,
        },
    };
    Ok(Some(tree))
}

fn number_tree(n: f64) -> Tree {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n) && n == (n as i64) as f64 {
        Tree::Int(n as i64)
    } else {
        Tree::Double(n)
    }
}

fn byte_list<E: Engine + ?Sized>(engine: &mut E, view: ObjectRef) -> Result<Tree, BridgeError> {
    let bytes = engine
        .backing_store(view)
        .ok_or_else(|| BridgeError::internal("view has no backing store"))?;
    Ok(Tree::List(bytes.iter().map(|&b| Tree::Int(i64::from(b))).collect()))
}

fn read_list<E: Engine + ?Sized>(engine: &mut E, array: ObjectRef, depth: usize) -> Result<Tree, BridgeError> {
    // `length` is script-controlled and may be huge on a sparse array
    let len = match engine.get(array, "length") {
        Value::Number(n) if n > f64::from(MAX_LIST_LEN) => {
            return Err(BridgeError::invalid_argument("array too long"));
        }
        Value::Number(n) if n >= 0.0 => n as u32,
        _ => return Err(BridgeError::type_mismatch("array has no numeric length")),
    };
    let mut items = Vec::new();
    for index in 0..len {
        let item = engine.get_index(array, index);
        items.push(read(engine, &item, depth + 1)?.unwrap_or(Tree::Null));
    }
    Ok(Tree::List(items))
}

fn read_map<E: Engine + ?Sized>(engine: &mut E, obj: ObjectRef, depth: usize) -> Result<Tree, BridgeError> {
    let mut map = TreeMap::new();
    for key in engine.own_keys(obj) {
        let member = engine.get(obj, &key);
        if let Some(tree) = read(engine, &member, depth + 1)? {
            map.insert(key, tree);
        }
    }
    Ok(Tree::Map(map))
}
