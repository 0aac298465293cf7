//! `tmpl` namespace: sub-template execution.
//!
//! `exec` is the sub-evaluation boundary for the control signal: an
//! early return inside the sub-template becomes this call's ordinary
//! result, while a script-raised error keeps propagating to the top.

use super::{get_str, Env};
use crate::error::Error;
use crate::value::Value;

pub(super) fn call(env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    match name {
        "exec" => {
            if args.len() > 2 {
                return Err(Error::OnlyOneArgument);
            }
            let tmpl_name = get_str(&args, 0, name)?;
            let data = args.get(1).cloned().unwrap_or(Value::Null);
            let mut buf = String::new();
            match env
                .templates
                .render_into(&tmpl_name, env.caps, &data, &mut buf)
            {
                Ok(()) => Ok(Value::Str(buf)),
                Err(Error::Return(v)) => Ok(v),
                Err(e) => Err(e),
            }
        }
        _ => Err(Error::NoSuchOperation {
            namespace: "tmpl".into(),
            operation: name.into(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
