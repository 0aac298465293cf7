//! `os` namespace: read-only views of the host environment.
//!
//! The whole namespace is excluded from `funcs::safe()`; nothing here
//! writes to the host.

use super::{get_str, Env};
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "environ" => Value::List(
            Kind::Str,
            std::env::vars()
                .map(|(k, v)| Value::Str(format!("{k}={v}")))
                .collect(),
        ),
        "getenv" => {
            let key = get_str(&args, 0, name)?;
            Value::Str(std::env::var(key).unwrap_or_default())
        }
        "getpid" => Value::Int(i64::from(std::process::id())),
        "getwd" => {
            let cwd = std::env::current_dir()?;
            Value::Str(cwd.to_string_lossy().into_owned())
        }
        "lookupEnv" => {
            let key = get_str(&args, 0, name)?;
            match std::env::var(key) {
                Ok(v) => Value::record([
                    ("found", Value::Bool(true)),
                    ("value", Value::Str(v)),
                ]),
                Err(_) => Value::record([
                    ("found", Value::Bool(false)),
                    ("value", Value::Str(String::new())),
                ]),
            }
        }
        "readFile" => {
            let p = get_str(&args, 0, name)?;
            Value::Str(std::fs::read_to_string(p)?)
        }
        "tempDir" => Value::Str(std::env::temp_dir().to_string_lossy().into_owned()),
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "os".into(),
                operation: name.into(),
            })
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
