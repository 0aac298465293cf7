//! `regexp` namespace, backed by the `regex` crate.

use regex::Regex;

use super::{get_int, get_str, Env};
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "findAllString" => {
            let re = Regex::new(&get_str(&args, 0, name)?)?;
            let s = get_str(&args, 1, name)?;
            let n = get_int(&args, 2, name)?;
            let matches = re.find_iter(&s).map(|m| m.as_str().to_owned());
            let parts: Vec<String> = match n {
                n if n < 0 => matches.collect(),
                0 => Vec::new(),
                n => matches.take(n as usize).collect(),
            };
            str_list(parts)
        }
        "findString" => {
            let re = Regex::new(&get_str(&args, 0, name)?)?;
            let s = get_str(&args, 1, name)?;
            Value::Str(
                re.find(&s)
                    .map(|m| m.as_str().to_owned())
                    .unwrap_or_default(),
            )
        }
        "matchString" => {
            let re = Regex::new(&get_str(&args, 0, name)?)?;
            Value::Bool(re.is_match(&get_str(&args, 1, name)?))
        }
        "quoteMeta" => Value::Str(regex::escape(&get_str(&args, 0, name)?)),
        "replaceAllString" => {
            let re = Regex::new(&get_str(&args, 0, name)?)?;
            let s = get_str(&args, 1, name)?;
            let repl = get_str(&args, 2, name)?;
            Value::Str(re.replace_all(&s, repl.as_str()).into_owned())
        }
        "split" => {
            let re = Regex::new(&get_str(&args, 0, name)?)?;
            let s = get_str(&args, 1, name)?;
            let n = get_int(&args, 2, name)?;
            let parts: Vec<String> = match n {
                n if n < 0 => re.split(&s).map(str::to_owned).collect(),
                0 => Vec::new(),
                n => re.splitn(&s, n as usize).map(str::to_owned).collect(),
            };
            str_list(parts)
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "regexp".into(),
                operation: name.into(),
            })
        }
    })
}

fn str_list(parts: Vec<String>) -> Value {
    Value::List(Kind::Str, parts.into_iter().map(Value::Str).collect())
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
        let (caps, templates) = env_with(&[&funcs::REGEXP]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        dispatch(&env, "regexp", name, args)
    }

    fn s(text: &str) -> Value {
        Value::Str(text.into())
    }

    #[test]
    fn matching_and_finding() {
        assert_eq!(
            run("matchString", vec![s(r"\d+"), s("abc123")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run("findString", vec![s(r"\d+"), s("a1b22c")]).unwrap(),
            s("1")
        );
        assert_eq!(
            run("findString", vec![s(r"\d+"), s("abc")]).unwrap(),
            s("")
        );
    }

    #[test]
    fn find_all_with_limit() {
        assert_eq!(
            run("findAllString", vec![s(r"\d+"), s("a1b22c333"), Value::Int(-1)]).unwrap(),
            Value::List(Kind::Str, vec![s("1"), s("22"), s("333")])
        );
        assert_eq!(
            run("findAllString", vec![s(r"\d+"), s("a1b22c333"), Value::Int(2)]).unwrap(),
            Value::List(Kind::Str, vec![s("1"), s("22")])
        );
        assert_eq!(
            run("findAllString", vec![s(r"\d+"), s("a1"), Value::Int(0)]).unwrap(),
            Value::List(Kind::Str, vec![])
        );
    }

    #[test]
    fn replacing_with_captures() {
        assert_eq!(
            run(
                "replaceAllString",
                vec![s(r"(\w+)@(\w+)"), s("joe@example"), s("$2.$1")]
            )
            .unwrap(),
            s("example.joe")
        );
    }

    #[test]
    fn splitting() {
        assert_eq!(
            run("split", vec![s(r"\s*,\s*"), s("a , b,c"), Value::Int(-1)]).unwrap(),
            Value::List(Kind::Str, vec![s("a"), s("b"), s("c")])
        );
    }

    #[test]
    fn quoting() {
        assert_eq!(run("quoteMeta", vec![s("a.b")]).unwrap(), s(r"a\.b"));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matches!(
            run("matchString", vec![s("("), s("x")]),
            Err(Error::Regex(_))
        ));
    }
}
