//! Dynamic runtime value passed between templates and gated functions.
//!
//! Templates are dynamically typed; every value a script sees is a
//! `Value`, and the conversion functions move between the variants
//! explicitly. Lists remember the kind of their elements so typed
//! list operations stay typed across calls.

use std::collections::BTreeMap;
use std::fmt;

/// Classification of a [`Value`]. `Any` marks a list holding mixed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Any,
    Null,
    Bool,
    Str,
    Int,
    I8,
    I16,
    I32,
    I64,
    Uint,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    List,
    Map,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Str => "string",
            Kind::Int => "int",
            Kind::I8 => "int8",
            Kind::I16 => "int16",
            Kind::I32 => "int32",
            Kind::I64 => "int64",
            Kind::Uint => "uint",
            Kind::U8 => "uint8",
            Kind::U16 => "uint16",
            Kind::U32 => "uint32",
            Kind::U64 => "uint64",
            Kind::F32 => "float32",
            Kind::F64 => "float64",
            Kind::List => "list",
            Kind::Map => "map",
        };
        f.write_str(name)
    }
}

/// A template runtime value.
///
/// `Int` and `Uint` are the platform-width kinds, fixed at 64 bits on
/// every target. A `List` carries the element [`Kind`] it was built
/// with; heterogeneous lists carry [`Kind::Any`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Str(String),
    Int(i64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Uint(u64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    List(Kind, Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Int(n) | Value::I64(n) => write!(f, "{n}"),
            Value::I8(n) => write!(f, "{n}"),
            Value::I16(n) => write!(f, "{n}"),
            Value::I32(n) => write!(f, "{n}"),
            Value::Uint(n) | Value::U64(n) => write!(f, "{n}"),
            Value::U8(n) => write!(f, "{n}"),
            Value::U16(n) => write!(f, "{n}"),
            Value::U32(n) => write!(f, "{n}"),
            Value::F32(x) => fmt_float(f, f64::from(*x)),
            Value::F64(x) => fmt_float(f, *x),
            Value::List(_, items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// Whole floats print with one decimal place so they stay recognizably float.
fn fmt_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{x}")
    }
}

impl Value {
    /// Classify this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::Str,
            Value::Int(_) => Kind::Int,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Uint(_) => Kind::Uint,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::List(..) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Truthiness as used by conditions and `cmp.or`: null, false, zero,
    /// and empty strings/lists/maps are falsy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(_, items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            other => other.num_f64().map(|x| x != 0.0).unwrap_or(false),
        }
    }

    /// Equality as used by the `==` operator: numeric when both sides are
    /// numeric, textual otherwise.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self.num_f64(), other.num_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other || self.to_string() == other.to_string(),
        }
    }

    /// Build a string-keyed map value.
    pub fn record<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Numeric view of the value, `None` for non-numeric variants.
    pub(crate) fn num_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) | Value::I64(n) => Some(*n as f64),
            Value::I8(n) => Some(f64::from(*n)),
            Value::I16(n) => Some(f64::from(*n)),
            Value::I32(n) => Some(f64::from(*n)),
            Value::Uint(n) | Value::U64(n) => Some(*n as f64),
            Value::U8(n) => Some(f64::from(*n)),
            Value::U16(n) => Some(f64::from(*n)),
            Value::U32(n) => Some(f64::from(*n)),
            Value::F32(x) => Some(f64::from(*x)),
            Value::F64(x) => Some(*x),
            _ => None,
        }
    }

    /// Exact integer view, `None` for floats and non-numeric variants.
    pub(crate) fn int_key(&self) -> Option<i128> {
        match self {
            Value::Bool(b) => Some(i128::from(*b)),
            Value::Int(n) | Value::I64(n) => Some(i128::from(*n)),
            Value::I8(n) => Some(i128::from(*n)),
            Value::I16(n) => Some(i128::from(*n)),
            Value::I32(n) => Some(i128::from(*n)),
            Value::Uint(n) | Value::U64(n) => Some(i128::from(*n)),
            Value::U8(n) => Some(i128::from(*n)),
            Value::U16(n) => Some(i128::from(*n)),
            Value::U32(n) => Some(i128::from(*n)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::F64(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Uint(7).to_string(), "7");
        assert_eq!(Value::Str("hello".into()).to_string(), "hello");
    }

    #[test]
    fn display_float() {
        assert_eq!(Value::F64(3.14).to_string(), "3.14");
        assert_eq!(Value::F64(1.0).to_string(), "1.0");
        assert_eq!(Value::F32(2.5).to_string(), "2.5");
    }

    #[test]
    fn display_list() {
        let v = Value::List(
            Kind::Int,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        );
        assert_eq!(v.to_string(), "[1 2 3]");
        assert_eq!(Value::List(Kind::Any, vec![]).to_string(), "[]");
    }

    #[test]
    fn display_map() {
        let v = Value::record([("b", Value::Int(2)), ("a", Value::Int(1))]);
        assert_eq!(v.to_string(), "map[a:1 b:2]");
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::I8(0).kind(), Kind::I8);
        assert_eq!(Value::List(Kind::Str, vec![]).kind(), Kind::List);
        assert_eq!(Kind::U16.to_string(), "uint16");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::Str("".into()).truthy());
        assert!(Value::Str("x".into()).truthy());
        assert!(!Value::Int(0).truthy());
        assert!(Value::F64(0.5).truthy());
        assert!(!Value::List(Kind::Any, vec![]).truthy());
    }

    #[test]
    fn loose_equality() {
        assert!(Value::Int(3).loose_eq(&Value::F64(3.0)));
        assert!(Value::Uint(3).loose_eq(&Value::I8(3)));
        assert!(Value::Str("a".into()).loose_eq(&Value::Str("a".into())));
        assert!(!Value::Str("3".into()).loose_eq(&Value::Str("4".into())));
        // A string never equals a number under loose equality rules
        // unless their renderings match.
        assert!(Value::Str("3".into()).loose_eq(&Value::Int(3)));
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(42u64), Value::Uint(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("hi"), Value::Str("hi".into()));
    }
}
