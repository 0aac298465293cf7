//! `dict` namespace: string-keyed map construction and inspection.

use std::collections::BTreeMap;

use super::{get_map, get_str, get_value, Env};
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "new" => {
            if args.len() % 2 != 0 {
                return Err(Error::Arg(format!(
                    "{name}: expected key/value pairs, got {} arguments",
                    args.len()
                )));
            }
            let mut entries = BTreeMap::new();
            for pair in args.chunks(2) {
                entries.insert(pair[0].to_string(), pair[1].clone());
            }
            Value::Map(entries)
        }
        "hasKey" => {
            let entries = get_map(&args, 0, name)?;
            let key = get_str(&args, 1, name)?;
            Value::Bool(entries.contains_key(&key))
        }
        "hasValue" => {
            let entries = get_map(&args, 0, name)?;
            let needle = get_value(&args, 1, name)?;
            Value::Bool(entries.values().any(|v| v == needle))
        }
        "keys" => {
            let entries = get_map(&args, 0, name)?;
            Value::List(
                Kind::Str,
                entries.keys().map(|k| Value::Str(k.clone())).collect(),
            )
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "dict".into(),
                operation: name.into(),
            })
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
