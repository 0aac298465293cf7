//! `strings` namespace: text inspection and rewriting.

use super::{get_int, get_list, get_str, Env};
use crate::conv;
use crate::error::Error;
use crate::value::{Kind, Value};

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "compare" => {
            let a = get_str(&args, 0, name)?;
            let b = get_str(&args, 1, name)?;
            Value::Int(match a.cmp(&b) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            })
        }
        "contains" => {
            let s = get_str(&args, 0, name)?;
            let substr = get_str(&args, 1, name)?;
            Value::Bool(s.contains(&substr))
        }
        "containsAny" => {
            let s = get_str(&args, 0, name)?;
            let chars = get_str(&args, 1, name)?;
            Value::Bool(s.chars().any(|c| chars.contains(c)))
        }
        "count" => {
            let s = get_str(&args, 0, name)?;
            let substr = get_str(&args, 1, name)?;
            // Counting the empty string yields one more than the rune count.
            Value::Int(if substr.is_empty() {
                s.chars().count() as i64 + 1
            } else {
                s.matches(&substr).count() as i64
            })
        }
        "equalFold" => {
            let a = get_str(&args, 0, name)?;
            let b = get_str(&args, 1, name)?;
            Value::Bool(a.to_lowercase() == b.to_lowercase())
        }
        "fields" => {
            let s = get_str(&args, 0, name)?;
            Value::List(
                Kind::Str,
                s.split_whitespace()
                    .map(|w| Value::Str(w.to_owned()))
                    .collect(),
            )
        }
        "hasPrefix" => {
            let s = get_str(&args, 0, name)?;
            let prefix = get_str(&args, 1, name)?;
            Value::Bool(s.starts_with(&prefix))
        }
        "hasSuffix" => {
            let s = get_str(&args, 0, name)?;
            let suffix = get_str(&args, 1, name)?;
            Value::Bool(s.ends_with(&suffix))
        }
        "index" => {
            let s = get_str(&args, 0, name)?;
            let substr = get_str(&args, 1, name)?;
            Value::Int(s.find(&substr).map(|i| i as i64).unwrap_or(-1))
        }
        "join" => {
            let (_, items) = get_list(&args, 0, name)?;
            let sep = get_str(&args, 1, name)?;
            Value::Str(conv::to_strings(items).join(&sep))
        }
        "lastIndex" => {
            let s = get_str(&args, 0, name)?;
            let substr = get_str(&args, 1, name)?;
            Value::Int(s.rfind(&substr).map(|i| i as i64).unwrap_or(-1))
        }
        "repeat" => {
            let s = get_str(&args, 0, name)?;
            let n = get_int(&args, 1, name)?;
            if n < 0 {
                return Err(Error::Arg(format!("{name}: negative repeat count")));
            }
            Value::Str(s.repeat(n as usize))
        }
        "replace" => {
            let s = get_str(&args, 0, name)?;
            let old = get_str(&args, 1, name)?;
            let new = get_str(&args, 2, name)?;
            let n = get_int(&args, 3, name)?;
            Value::Str(match n {
                n if n < 0 => s.replace(&old, &new),
                0 => s,
                n => s.replacen(&old, &new, n as usize),
            })
        }
        "replaceAll" => {
            let s = get_str(&args, 0, name)?;
            let old = get_str(&args, 1, name)?;
            let new = get_str(&args, 2, name)?;
            Value::Str(s.replace(&old, &new))
        }
        "split" => {
            let s = get_str(&args, 0, name)?;
            let sep = get_str(&args, 1, name)?;
            str_list(split_str(&s, &sep, -1))
        }
        "splitN" => {
            let s = get_str(&args, 0, name)?;
            let sep = get_str(&args, 1, name)?;
            let n = get_int(&args, 2, name)?;
            str_list(split_str(&s, &sep, n))
        }
        "toLower" => Value::Str(get_str(&args, 0, name)?.to_lowercase()),
        "toTitle" => Value::Str(get_str(&args, 0, name)?.to_uppercase()),
        "toUpper" => Value::Str(get_str(&args, 0, name)?.to_uppercase()),
        "trim" => {
            let s = get_str(&args, 0, name)?;
            let cutset = get_str(&args, 1, name)?;
            Value::Str(s.trim_matches(|c| cutset.contains(c)).to_owned())
        }
        "trimLeft" => {
            let s = get_str(&args, 0, name)?;
            let cutset = get_str(&args, 1, name)?;
            Value::Str(s.trim_start_matches(|c| cutset.contains(c)).to_owned())
        }
        "trimPrefix" => {
            let s = get_str(&args, 0, name)?;
            let prefix = get_str(&args, 1, name)?;
            Value::Str(s.strip_prefix(&prefix).unwrap_or(&s).to_owned())
        }
        "trimRight" => {
            let s = get_str(&args, 0, name)?;
            let cutset = get_str(&args, 1, name)?;
            Value::Str(s.trim_end_matches(|c| cutset.contains(c)).to_owned())
        }
        "trimSpace" => Value::Str(get_str(&args, 0, name)?.trim().to_owned()),
        "trimSuffix" => {
            let s = get_str(&args, 0, name)?;
            let suffix = get_str(&args, 1, name)?;
            Value::Str(s.strip_suffix(&suffix).unwrap_or(&s).to_owned())
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "strings".into(),
                operation: name.into(),
            })
        }
    })
}

fn str_list(parts: Vec<String>) -> Value {
    Value::List(Kind::Str, parts.into_iter().map(Value::Str).collect())
}

/// Split with the limit semantics of the original surface: a negative
/// limit keeps every part, zero yields nothing, a positive limit caps
/// the part count with the remainder left unsplit. An empty separator
/// splits between characters.
fn split_str(s: &str, sep: &str, n: i64) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    if sep.is_empty() {
        let mut parts: Vec<String> = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            if n > 0 && parts.len() as i64 == n - 1 {
                parts.push(rest.to_owned());
                return parts;
            }
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) => {
                    parts.push(c.to_string());
                    rest = chars.as_str();
                }
                None => break,
            }
        }
        return parts;
    }
    if n < 0 {
        s.split(sep).map(str::to_owned).collect()
    } else {
        s.splitn(n as usize, sep).map(str::to_owned).collect()
    }
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
        let (caps, templates) = env_with(&[&funcs::STRINGS]);
        let env = Env {
            caps: &caps,
            templates: &templates,
        };
        dispatch(&env, "strings", name, args)
    }

    fn s(text: &str) -> Value {
        Value::Str(text.into())
    }

    #[test]
    fn case_changes() {
        assert_eq!(run("toLower", vec![s("INDEX.HTML")]).unwrap(), s("index.html"));
        assert_eq!(run("toUpper", vec![s("abc")]).unwrap(), s("ABC"));
    }

    #[test]
    fn searching() {
        assert_eq!(run("index", vec![s("chicken"), s("ken")]).unwrap(), Value::Int(4));
        assert_eq!(run("index", vec![s("chicken"), s("dmr")]).unwrap(), Value::Int(-1));
        assert_eq!(
            run("lastIndex", vec![s("go gopher"), s("go")]).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            run("contains", vec![s("seafood"), s("foo")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run("containsAny", vec![s("failure"), s("ui")]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn counting() {
        assert_eq!(run("count", vec![s("cheese"), s("e")]).unwrap(), Value::Int(3));
        assert_eq!(run("count", vec![s("five"), s("")]).unwrap(), Value::Int(5));
    }

    #[test]
    fn replacing() {
        assert_eq!(
            run("replace", vec![s("oink oink oink"), s("k"), s("ky"), Value::Int(2)]).unwrap(),
            s("oinky oinky oink")
        );
        assert_eq!(
            run("replaceAll", vec![s("oink oink"), s("oink"), s("moo")]).unwrap(),
            s("moo moo")
        );
    }

    #[test]
    fn splitting() {
        assert_eq!(
            run("split", vec![s("a,b,c"), s(",")]).unwrap(),
            Value::List(Kind::Str, vec![s("a"), s("b"), s("c")])
        );
        assert_eq!(
            run("splitN", vec![s("a,b,c"), s(","), Value::Int(2)]).unwrap(),
            Value::List(Kind::Str, vec![s("a"), s("b,c")])
        );
        assert_eq!(
            run("splitN", vec![s("a,b"), s(","), Value::Int(0)]).unwrap(),
            Value::List(Kind::Str, vec![])
        );
        assert_eq!(
            run("split", vec![s("abc"), s("")]).unwrap(),
            Value::List(Kind::Str, vec![s("a"), s("b"), s("c")])
        );
    }

    #[test]
    fn fields_and_join() {
        assert_eq!(
            run("fields", vec![s("  foo bar  baz   ")]).unwrap(),
            Value::List(Kind::Str, vec![s("foo"), s("bar"), s("baz")])
        );
        let list = Value::List(Kind::Str, vec![s("a"), s("b"), s("c")]);
        assert_eq!(run("join", vec![list, s("-")]).unwrap(), s("a-b-c"));
    }

    #[test]
    fn trimming() {
        assert_eq!(
            run("trim", vec![s("xxhixx"), s("x")]).unwrap(),
            s("hi")
        );
        assert_eq!(
            run("trimPrefix", vec![s("v1.2"), s("v")]).unwrap(),
            s("1.2")
        );
        assert_eq!(
            run("trimPrefix", vec![s("1.2"), s("v")]).unwrap(),
            s("1.2")
        );
        assert_eq!(run("trimSpace", vec![s("  hi  ")]).unwrap(), s("hi"));
        assert_eq!(
            run("trimSuffix", vec![s("file.txt"), s(".txt")]).unwrap(),
            s("file")
        );
    }

    #[test]
    fn comparing() {
        assert_eq!(run("compare", vec![s("a"), s("b")]).unwrap(), Value::Int(-1));
        assert_eq!(run("compare", vec![s("a"), s("a")]).unwrap(), Value::Int(0));
        assert_eq!(
            run("equalFold", vec![s("Go"), s("GO")]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn repeating() {
        assert_eq!(run("repeat", vec![s("na"), Value::Int(2)]).unwrap(), s("nana"));
        assert!(run("repeat", vec![s("na"), Value::Int(-1)]).is_err());
    }
}
