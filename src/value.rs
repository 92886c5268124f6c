//! A dynamically typed value, so one map can mix keys and values of
//! different kinds and nest maps inside maps.

use std::fmt;

use crate::associative::Associative;
use crate::ordered_map::OrderedMap;
use crate::render::{Node, Shape};

/// A heterogeneous key or value.
///
/// Two renderings matter:
///
/// * [`Display`](fmt::Display) is the plain, canonical text. Strings and
///   symbols print their bare text, so `"key"` and `:key` sort together.
/// * [`Debug`](fmt::Debug) is the inspect form used by
///   [`OrderedMap::inspect`]: strings are quoted, symbols get a leading `:`,
///   and nil is spelled out.
#[derive(Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An interned-looking name, distinct from a string with the same text.
    Symbol(String),
    Map(OrderedMap<Value, Value>),
}

impl Value {
    /// Makes a symbol.
    pub fn sym<S: Into<String>>(name: S) -> Self {
        Value::Symbol(name.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap<Value, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut OrderedMap<Value, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Nil
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) | Value::Symbol(s) => f.write_str(s),
            Value::Map(map) => write!(f, "{:?}", map),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<OrderedMap<Value, Value>> for Value {
    fn from(map: OrderedMap<Value, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl Associative<Value, Value> for Value {
    fn pairs(&self) -> Option<Vec<(&Value, &Value)>> {
        self.as_map().and_then(|map| map.pairs())
    }

    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

impl Node for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Map(map) => map.shape(),
            leaf => Shape::Leaf(leaf.to_string()),
        }
    }
}
