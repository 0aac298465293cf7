//! The gated namespace surface.
//!
//! One module per namespace; each receives already-evaluated arguments
//! and returns `Result<Value, Error>`. Every dispatcher resolves the
//! operation in the registry and consults the capability set before
//! touching any argument, so denial happens with no side effects.

use std::collections::BTreeMap;

use crate::caps::FuncSet;
use crate::engine::template::Template;
use crate::error::Error;
use crate::funcs;
use crate::value::{Kind, Value};

mod cmp;
mod conv;
mod dict;
mod json;
mod os;
mod path;
mod regexp;
mod slice;
mod strings;
mod tmpl;
mod url;

/// Evaluation environment handed to every operation.
pub(crate) struct Env<'a> {
    pub caps: &'a FuncSet,
    pub templates: &'a Template,
}

/// Dispatch a namespaced call. The caller has already established that
/// the namespace is visible; unknown operations within it fail here.
pub(crate) fn call(
    env: &Env<'_>,
    namespace: &str,
    name: &str,
    args: Vec<Value>,
) -> Result<Value, Error> {
    let f = funcs::find(namespace, name).ok_or_else(|| Error::NoSuchOperation {
        namespace: namespace.to_owned(),
        operation: name.to_owned(),
    })?;
    env.caps.check(f)?;
    match namespace {
        "cmp" => cmp::call(env, name, args),
        "conv" => conv::call(env, name, args),
        "dict" => dict::call(env, name, args),
        "json" => json::call(env, name, args),
        "os" => os::call(env, name, args),
        "path" => path::call(env, name, args),
        "regexp" => regexp::call(env, name, args),
        "slice" => slice::call(env, name, args),
        "strings" => strings::call(env, name, args),
        "tmpl" => tmpl::call(env, name, args),
        "url" => url::call(env, name, args),
        _ => Err(Error::NoSuchOperation {
            namespace: namespace.to_owned(),
            operation: name.to_owned(),
        }),
    }
}

// ── Argument helpers ──────────────────────────────────────────────────────────

fn get_value<'a>(args: &'a [Value], idx: usize, name: &str) -> Result<&'a Value, Error> {
    args.get(idx)
        .ok_or_else(|| Error::Arg(format!("{name}: argument {idx} missing")))
}

fn get_str(args: &[Value], idx: usize, name: &str) -> Result<String, Error> {
    Ok(get_value(args, idx, name)?.to_string())
}

fn get_int(args: &[Value], idx: usize, name: &str) -> Result<i64, Error> {
    Ok(crate::conv::to_i64(get_value(args, idx, name)?)?)
}

fn get_list<'a>(
    args: &'a [Value],
    idx: usize,
    name: &str,
) -> Result<(Kind, &'a [Value]), Error> {
    match get_value(args, idx, name)? {
        Value::List(kind, items) => Ok((*kind, items)),
        other => Err(Error::NotAList(other.kind())),
    }
}

fn get_map<'a>(
    args: &'a [Value],
    idx: usize,
    name: &str,
) -> Result<&'a BTreeMap<String, Value>, Error> {
    match get_value(args, idx, name)? {
        Value::Map(entries) => Ok(entries),
        other => Err(Error::NotAMap(other.kind())),
    }
}

/// Batch operations accept either one list argument or bare variadic
/// scalars.
fn get_items<'a>(args: &'a [Value]) -> &'a [Value] {
    match args {
        [Value::List(_, items)] => items,
        _ => args,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Allowed;

    pub(super) fn env_with(allowed: &[&dyn Allowed]) -> (FuncSet, Template) {
        (FuncSet::new(allowed), Template::new())
    }

    #[test]
    fn missing_argument_names_position() {
        let err = get_str(&[], 0, "toLower").unwrap_err();
        assert_eq!(err.to_string(), "toLower: argument 0 missing");
    }

    #[test]
    fn denial_happens_before_argument_handling() {
        let (caps, templates) = env_with(&[]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        // No arguments at all: the gate must fire first.
        let err = call(&env, "strings", "toLower", vec![]).unwrap_err();
        assert!(matches!(err, Error::NotAllowed(f) if f == funcs::STRINGS_TO_LOWER));
    }

    #[test]
    fn unknown_operation() {
        let (caps, templates) = env_with(&[&funcs::STRINGS]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        let err = call(&env, "strings", "frobnicate", vec![]).unwrap_err();
        assert!(matches!(err, Error::NoSuchOperation { .. }));
    }
}
