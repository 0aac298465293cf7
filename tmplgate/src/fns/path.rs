//! `path` namespace: slash-separated path manipulation.

use super::{get_str, Env};
use crate::conv;
use crate::error::Error;
use crate::value::Value;

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "base" => Value::Str(base(&get_str(&args, 0, name)?)),
        "clean" => Value::Str(clean(&get_str(&args, 0, name)?)),
        "dir" => Value::Str(dir(&get_str(&args, 0, name)?)),
        "ext" => Value::Str(ext(&get_str(&args, 0, name)?)),
        "join" => {
            let parts = conv::to_strings(&args);
            Value::Str(join(&parts))
        }
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "path".into(),
                operation: name.into(),
            })
        }
    })
}

/// Lexically canonical form of the path: collapses repeated slashes,
/// resolves `.` and `..` segments, drops trailing slashes. The empty
/// path cleans to `.`.
pub(super) fn clean(p: &str) -> String {
    if p.is_empty() {
        return ".".to_owned();
    }
    let rooted = p.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in p.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().map(|s| *s != "..").unwrap_or(false) {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    let mut out = segments.join("/");
    if rooted {
        out.insert(0, '/');
    }
    if out.is_empty() {
        ".".to_owned()
    } else {
        out
    }
}

fn base(p: &str) -> String {
    if p.is_empty() {
        return ".".to_owned();
    }
    let trimmed = p.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    match trimmed.rfind('/') {
        Some(i) => trimmed[i + 1..].to_owned(),
        None => trimmed.to_owned(),
    }
}

fn dir(p: &str) -> String {
    match p.rfind('/') {
        Some(i) => clean(&p[..i + 1]),
        None => ".".to_owned(),
    }
}

fn ext(p: &str) -> String {
    let last = p.rfind('/').map(|i| &p[i + 1..]).unwrap_or(p);
    match last.rfind('.') {
        Some(i) => last[i..].to_owned(),
        None => String::new(),
    }
}

/// Join non-empty elements with slashes and clean the result. All-empty
/// input joins to the empty string.
pub(super) fn join(parts: &[String]) -> String {
    let nonempty: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if nonempty.is_empty() {
        return String::new();
    }
    clean(&nonempty.join("/"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
