//! `conv` namespace: explicit kind conversions.

use super::{get_items, get_value, Env};
use crate::conv;
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "toBool" => Value::Bool(conv::to_bool(get_value(&args, 0, name)?)),
        "toBools" => Value::List(
            Kind::Bool,
            conv::to_bools(get_items(&args))
                .into_iter()
                .map(Value::Bool)
                .collect(),
        ),
        "toString" => Value::Str(conv::to_string(get_value(&args, 0, name)?)),
        "toStrings" => Value::List(
            Kind::Str,
            conv::to_strings(get_items(&args))
                .into_iter()
                .map(Value::Str)
                .collect(),
        ),
        "toInt" => Value::Int(conv::to_int(get_value(&args, 0, name)?)?),
        "toInts" => Value::List(
            Kind::Int,
            conv::to_ints(get_items(&args))?
                .into_iter()
                .map(Value::Int)
                .collect(),
        ),
        "toInt8" => Value::I8(conv::to_i8(get_value(&args, 0, name)?)?),
        "toInt8s" => Value::List(
            Kind::I8,
            conv::to_i8s(get_items(&args))?
                .into_iter()
                .map(Value::I8)
                .collect(),
        ),
        "toInt16" => Value::I16(conv::to_i16(get_value(&args, 0, name)?)?),
        "toInt16s" => Value::List(
            Kind::I16,
            conv::to_i16s(get_items(&args))?
                .into_iter()
                .map(Value::I16)
                .collect(),
        ),
        "toInt32" => Value::I32(conv::to_i32(get_value(&args, 0, name)?)?),
        "toInt32s" => Value::List(
            Kind::I32,
            conv::to_i32s(get_items(&args))?
                .into_iter()
                .map(Value::I32)
                .collect(),
        ),
        "toInt64" => Value::I64(conv::to_i64(get_value(&args, 0, name)?)?),
        "toInt64s" => Value::List(
            Kind::I64,
            conv::to_i64s(get_items(&args))?
                .into_iter()
                .map(Value::I64)
                .collect(),
        ),
        "toUint" => Value::Uint(conv::to_uint(get_value(&args, 0, name)?)?),
        "toUints" => Value::List(
            Kind::Uint,
            conv::to_uints(get_items(&args))?
                .into_iter()
                .map(Value::Uint)
                .collect(),
        ),
        "toUint8" => Value::U8(conv::to_u8(get_value(&args, 0, name)?)?),
        "toUint8s" => Value::List(
            Kind::U8,
            conv::to_u8s(get_items(&args))?
                .into_iter()
                .map(Value::U8)
                .collect(),
        ),
        "toUint16" => Value::U16(conv::to_u16(get_value(&args, 0, name)?)?),
        "toUint16s" => Value::List(
            Kind::U16,
            conv::to_u16s(get_items(&args))?
                .into_iter()
                .map(Value::U16)
                .collect(),
        ),
        "toUint32" => Value::U32(conv::to_u32(get_value(&args, 0, name)?)?),
        "toUint32s" => Value::List(
            Kind::U32,
            conv::to_u32s(get_items(&args))?
                .into_iter()
                .map(Value::U32)
                .collect(),
        ),
        "toUint64" => Value::U64(conv::to_u64(get_value(&args, 0, name)?)?),
        "toUint64s" => Value::List(
            Kind::U64,
            conv::to_u64s(get_items(&args))?
                .into_iter()
                .map(Value::U64)
                .collect(),
        ),
        "toFloat32" => Value::F32(conv::to_f32(get_value(&args, 0, name)?)?),
        "toFloat32s" => Value::List(
            Kind::F32,
            conv::to_f32s(get_items(&args))?
                .into_iter()
                .map(Value::F32)
                .collect(),
        ),
        "toFloat64" => Value::F64(conv::to_f64(get_value(&args, 0, name)?)?),
        "toFloat64s" => Value::List(
            Kind::F64,
            conv::to_f64s(get_items(&args))?
                .into_iter()
                .map(Value::F64)
                .collect(),
        ),
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "conv".into(),
                operation: name.into(),
            })
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::tests::env_with;
    use super::super::{call as dispatch, Env};
    use crate::error::Error;
    use crate::funcs;
    use crate::value::{Kind, Value};

    fn run(name: &str, args: Vec<Value>) -> Result<Value, Error> {
        let (caps, templates) = env_with(&[&funcs::CONV]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        dispatch(&env, "conv", name, args)
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(
            run("toInt8", vec![Value::Str("127".into())]).unwrap(),
            Value::I8(127)
        );
        assert_eq!(
            run("toBool", vec![Value::Str("yes".into())]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run("toString", vec![Value::F64(2.0)]).unwrap(),
            Value::Str("2.0".into())
        );
    }

    #[test]
    fn scalar_overflow_propagates() {
        assert!(matches!(
            run("toInt8", vec![Value::Int(300)]),
            Err(Error::Coercion(_))
        ));
    }

    #[test]
    fn batch_from_list_argument() {
        let list = Value::List(
            Kind::Any,
            vec![Value::Str("1".into()), Value::Int(2), Value::F64(3.0)],
        );
        assert_eq!(
            run("toInt64s", vec![list]).unwrap(),
            Value::List(
                Kind::I64,
                vec![Value::I64(1), Value::I64(2), Value::I64(3)]
            )
        );
    }

    #[test]
    fn batch_from_variadic_arguments() {
        assert_eq!(
            run("toStrings", vec![Value::Int(1), Value::Bool(true)]).unwrap(),
            Value::List(
                Kind::Str,
                vec![Value::Str("1".into()), Value::Str("true".into())]
            )
        );
    }

    #[test]
    fn batch_has_no_partial_result() {
        let list = Value::List(
            Kind::Any,
            vec![Value::Int(1), Value::Str("nope".into())],
        );
        assert!(run("toInt64s", vec![list]).is_err());
    }
}
