//! `json` namespace, backed by `serde_json`.

use serde::Serialize;

use super::{get_str, get_value, Env};
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "marshal" => {
            let v = get_value(&args, 0, name)?;
            Value::Str(serde_json::to_string(&to_json(v))?)
        }
        "marshalIndent" => {
            let v = get_value(&args, 0, name)?;
            let prefix = get_str(&args, 1, name)?;
            let indent = get_str(&args, 2, name)?;
            Value::Str(marshal_indent(v, &prefix, &indent)?)
        }
        "unmarshal" => {
            let s = get_str(&args, 0, name)?;
            from_json(serde_json::from_str(&s)?)
        }
        "valid" => {
            let s = get_str(&args, 0, name)?;
            Value::Bool(serde_json::from_str::<serde_json::Value>(&s).is_ok())
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "json".into(),
                operation: name.into(),
            })
        }
    })
}

fn marshal_indent(v: &Value, prefix: &str, indent: &str) -> Result<String, Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    to_json(v).serialize(&mut ser)?;
    let rendered = String::from_utf8(buf)
        .map_err(|e| Error::Arg(format!("marshalIndent: invalid UTF-8 indent: {e}")))?;
    if prefix.is_empty() {
        Ok(rendered)
    } else {
        // The prefix opens every line except the first.
        Ok(rendered.replace('\n', &format!("\n{prefix}")))
    }
}

/// Map a runtime value onto the JSON data model. Non-finite floats have
/// no JSON rendering and become null.
fn to_json(v: &Value) -> serde_json::Value {
    use serde_json::{Map, Number};
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Int(n) | Value::I64(n) => serde_json::Value::Number(Number::from(*n)),
        Value::I8(n) => serde_json::Value::Number(Number::from(*n)),
        Value::I16(n) => serde_json::Value::Number(Number::from(*n)),
        Value::I32(n) => serde_json::Value::Number(Number::from(*n)),
        Value::Uint(n) | Value::U64(n) => serde_json::Value::Number(Number::from(*n)),
        Value::U8(n) => serde_json::Value::Number(Number::from(*n)),
        Value::U16(n) => serde_json::Value::Number(Number::from(*n)),
        Value::U32(n) => serde_json::Value::Number(Number::from(*n)),
        Value::F32(x) => Number::from_f64(f64::from(*x))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::F64(x) => Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::List(_, items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect::<Map<_, _>>(),
        ),
    }
}

fn from_json(j: serde_json::Value) -> Value {
    match j {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                n.as_f64().map(Value::F64).unwrap_or(Value::Null)
            }
        }
        serde_json::Value::Array(items) => {
            Value::List(Kind::Any, items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect(),
        ),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
