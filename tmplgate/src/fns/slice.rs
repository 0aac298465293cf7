//! `slice` namespace: list construction and the polymorphic list
//! operations.

use super::{get_list, get_value, Env};
use crate::conv;
use crate::error::Error;
use crate::list;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "new" => Value::List(Kind::Any, args),
        "newBools" => Value::List(
            Kind::Bool,
            conv::to_bools(&args).into_iter().map(Value::Bool).collect(),
        ),
        "newFloat64s" => Value::List(
            Kind::F64,
            conv::to_f64s(&args)?.into_iter().map(Value::F64).collect(),
        ),
        "newInt64s" => Value::List(
            Kind::I64,
            conv::to_i64s(&args)?.into_iter().map(Value::I64).collect(),
        ),
        "newInts" => Value::List(
            Kind::Int,
            conv::to_ints(&args)?.into_iter().map(Value::Int).collect(),
        ),
        "newStrings" => Value::List(
            Kind::Str,
            conv::to_strings(&args).into_iter().map(Value::Str).collect(),
        ),
        "append" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::append(kind, items, &args[1..])?
        }
        "prepend" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::prepend(kind, items, &args[1..])?
        }
        "compact" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::compact(kind, items)?
        }
        "contains" => {
            let (kind, items) = get_list(&args, 0, name)?;
            let raw = get_value(&args, 1, name)?;
            // Compare in the list's element kind when it has one.
            let needle = list::coerce_to_kind(kind, raw).unwrap_or_else(|_| raw.clone());
            Value::Bool(list::contains(items, &needle))
        }
        "len" => {
            let (_, items) = get_list(&args, 0, name)?;
            Value::Int(list::len(items))
        }
        "reverse" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::reverse(kind, items)
        }
        "sort" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::sort(kind, items)?
        }
        "unique" => {
            let (kind, items) = get_list(&args, 0, name)?;
            list::unique(kind, items)
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "slice".into(),
                operation: name.into(),
            })
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
