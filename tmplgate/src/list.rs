//! Canonical collection algorithms over kind-erased item slices.
//!
//! Every operation here takes the element kind and the items of a list
//! value and returns a fresh value; inputs are never mutated. The typed
//! entry points of the `slice` namespace normalize into this form, so
//! each algorithm exists exactly once.

use crate::conv;
use crate::error::{CoercionError, Error};
use crate::value::{Kind, Value};

/// Membership test with strict value equality.
pub fn contains(items: &[Value], needle: &Value) -> bool {
    items.iter().any(|v| v == needle)
}

pub fn reverse(kind: Kind, items: &[Value]) -> Value {
    Value::List(kind, items.iter().rev().cloned().collect())
}

/// Ascending sort into a new list. Mixed-kind lists have no total
/// order, so `Kind::Any` fails.
pub fn sort(kind: Kind, items: &[Value]) -> Result<Value, Error> {
    if kind == Kind::Any {
        return Err(Error::CannotSortAnyList);
    }
    let mut sorted = items.to_vec();
    match kind {
        Kind::Bool => sorted.sort_by_key(|v| v.truthy()),
        Kind::Str => sorted.sort_by_key(|v| v.to_string()),
        Kind::F32 | Kind::F64 => sorted.sort_by(|a, b| {
            let (a, b) = (a.num_f64().unwrap_or(0.0), b.num_f64().unwrap_or(0.0));
            a.total_cmp(&b)
        }),
        _ => sorted.sort_by(|a, b| {
            let (a, b) = (a.int_key().unwrap_or(0), b.int_key().unwrap_or(0));
            a.cmp(&b)
        }),
    }
    Ok(Value::List(kind, sorted))
}

/// Append values to the end, re-specializing each into the element kind.
pub fn append(kind: Kind, items: &[Value], extra: &[Value]) -> Result<Value, Error> {
    let mut out = items.to_vec();
    for v in extra {
        out.push(coerce_to_kind(kind, v)?);
    }
    Ok(Value::List(kind, out))
}

/// Insert values at the front, keeping their given order.
pub fn prepend(kind: Kind, items: &[Value], extra: &[Value]) -> Result<Value, Error> {
    let mut out = Vec::with_capacity(items.len() + extra.len());
    for v in extra {
        out.push(coerce_to_kind(kind, v)?);
    }
    out.extend_from_slice(items);
    Ok(Value::List(kind, out))
}

pub fn len(items: &[Value]) -> i64 {
    items.len() as i64
}

/// Drop duplicates, keeping the first occurrence of each value.
pub fn unique(kind: Kind, items: &[Value]) -> Value {
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for v in items {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    Value::List(kind, out)
}

/// Collapse runs of consecutive equal values into one.
pub fn compact(kind: Kind, items: &[Value]) -> Result<Value, Error> {
    if kind == Kind::Any {
        return Err(Error::CannotCompactAnyList);
    }
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for v in items {
        if out.last() != Some(v) {
            out.push(v.clone());
        }
    }
    Ok(Value::List(kind, out))
}

/// Convert a value into the element kind of a list. `Any` accepts
/// everything unchanged.
pub fn coerce_to_kind(kind: Kind, v: &Value) -> Result<Value, CoercionError> {
    Ok(match kind {
        Kind::Any => v.clone(),
        Kind::Null => Value::Null,
        Kind::Bool => Value::Bool(conv::to_bool(v)),
        Kind::Str => Value::Str(conv::to_string(v)),
        Kind::Int => Value::Int(conv::to_int(v)?),
        Kind::I8 => Value::I8(conv::to_i8(v)?),
        Kind::I16 => Value::I16(conv::to_i16(v)?),
        Kind::I32 => Value::I32(conv::to_i32(v)?),
        Kind::I64 => Value::I64(conv::to_i64(v)?),
        Kind::Uint => Value::Uint(conv::to_uint(v)?),
        Kind::U8 => Value::U8(conv::to_u8(v)?),
        Kind::U16 => Value::U16(conv::to_u16(v)?),
        Kind::U32 => Value::U32(conv::to_u32(v)?),
        Kind::U64 => Value::U64(conv::to_u64(v)?),
        Kind::F32 => Value::F32(conv::to_f32(v)?),
        Kind::F64 => Value::F64(conv::to_f64(v)?),
        Kind::List | Kind::Map => {
            if v.kind() == kind {
                v.clone()
            } else {
                return Err(CoercionError::UnsupportedKind {
                    kind: v.kind(),
                    target: if kind == Kind::List { "list" } else { "map" },
                });
            }
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
