//! `cmp` namespace.

use super::Env;
use crate::error::Error;
use crate::value::Value;

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    match name {
        // First truthy argument, else the last one. A single list
        // argument is searched element-wise.
        "or" => {
            let candidates: &[Value] = match args.as_slice() {
                [Value::List(_, items)] => items,
                other => other,
            };
            Ok(candidates
                .iter()
                .find(|v| v.truthy())
                .or_else(|| candidates.last())
                .cloned()
                .unwrap_or(Value::Null))
        }
        _ => Err(Error::NoSuchOperation {
            namespace: "cmp".into(),
            operation: name.into(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::tests::env_with;
    use super::super::{call as dispatch, Env};
    use crate::funcs;
    use crate::value::{Kind, Value};

    fn or(args: Vec<Value>) -> Value {
        let (caps, templates) = env_with(&[&funcs::CMP]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        dispatch(&env, "cmp", "or", args).unwrap()
    }

    #[test]
    fn first_truthy_wins() {
        assert_eq!(
            or(vec![Value::Str("".into()), Value::Int(0), Value::Str("x".into())]),
            Value::Str("x".into())
        );
    }

    #[test]
    fn all_falsy_yields_last() {
        assert_eq!(or(vec![Value::Null, Value::Int(0)]), Value::Int(0));
        assert_eq!(or(vec![]), Value::Null);
    }

    #[test]
    fn single_list_searched_elementwise() {
        let list = Value::List(Kind::Any, vec![Value::Int(0), Value::Int(7)]);
        assert_eq!(or(vec![list]), Value::Int(7));
    }
}
