//! `url` namespace: percent-escaping and URL path joining.

use super::{get_str, path, Env};
use crate::conv;
use crate::error::Error;
use crate::value::Value;

pub(super) fn call(_env: &Env<'_>, name: &str, args: Vec<Value>) -> Result<Value, Error> {
    Ok(match name {
        "joinPath" => {
            let base = get_str(&args, 0, name)?;
            let elems = conv::to_strings(&args[1..]);
            Value::Str(join_path(&base, &elems))
        }
        "pathEscape" => Value::Str(escape(&get_str(&args, 0, name)?, Mode::PathSegment)),
        "pathUnescape" => Value::Str(unescape(&get_str(&args, 0, name)?, false)?),
        "queryEscape" => Value::Str(escape(&get_str(&args, 0, name)?, Mode::QueryComponent)),
        "queryUnescape" => Value::Str(unescape(&get_str(&args, 0, name)?, true)?),
        _ => {
            return Err(Error::NoSuchOperation {
                namespace: "url".into(),
                operation: name.into(),
            })
        }
    })
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    PathSegment,
    QueryComponent,
}

// Unreserved characters are never escaped. Path segments additionally
// keep the sub-delims that carry no meaning inside one segment; query
// components keep nothing else and encode spaces as '+'.
fn should_escape(c: u8, mode: Mode) -> bool {
    if c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'.' | b'~') {
        return false;
    }
    match mode {
        Mode::PathSegment => !matches!(c, b'$' | b'&' | b'+' | b':' | b'=' | b'@'),
        Mode::QueryComponent => true,
    }
}

fn escape(s: &str, mode: Mode) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if b == b' ' && mode == Mode::QueryComponent {
            out.push('+');
        } else if should_escape(b, mode) {
            out.push('%');
            out.push(HEX[usize::from(b >> 4)] as char);
            out.push(HEX[usize::from(b & 0x0f)] as char);
        } else {
            out.push(b as char);
        }
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn unescape(s: &str, plus_to_space: bool) -> Result<String, Error> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_digit);
                let lo = bytes.get(i + 2).copied().and_then(hex_digit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        let end = (i + 3).min(bytes.len());
                        let seen = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                        return Err(Error::UrlEscape(seen));
                    }
                }
            }
            b'+' if plus_to_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|e| Error::UrlEscape(e.to_string()))
}

/// Join path elements onto a base URL and clean the resulting path.
/// The scheme-and-authority prefix, when present, passes through
/// untouched and the path below it stays absolute.
fn join_path(base: &str, elems: &[String]) -> String {
    let (prefix, base_path) = match base.find("://") {
        Some(i) => {
            let rest = &base[i + 3..];
            match rest.find('/') {
                Some(j) => base.split_at(i + 3 + j),
                None => (base, ""),
            }
        }
        None => ("", base),
    };
    let mut parts: Vec<String> = Vec::with_capacity(elems.len() + 1);
    if !base_path.is_empty() {
        parts.push(base_path.to_owned());
    }
    parts.extend(elems.iter().cloned());
    let mut joined = path::join(&parts);
    if joined == "." {
        joined.clear();
    }
    if !prefix.is_empty() && !joined.starts_with('/') {
        joined.insert(0, '/');
    }
    format!("{prefix}{joined}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_escape_round_trip() {
        assert_eq!(escape("hello world", Mode::PathSegment), "hello%20world");
        assert_eq!(escape("a/b", Mode::PathSegment), "a%2Fb");
        assert_eq!(escape("a=b:c", Mode::PathSegment), "a=b:c");
        assert_eq!(unescape("hello%20world", false).unwrap(), "hello world");
    }

    #[test]
    fn query_escape_round_trip() {
        assert_eq!(escape("hello world?", Mode::QueryComponent), "hello+world%3F");
        assert_eq!(escape("a&b=c", Mode::QueryComponent), "a%26b%3Dc");
        assert_eq!(unescape("hello+world%3F", true).unwrap(), "hello world?");
        // Path unescape leaves '+' alone.
        assert_eq!(unescape("a+b", false).unwrap(), "a+b");
    }

    #[test]
    fn malformed_escapes_fail() {
        assert!(matches!(unescape("abc%2", false), Err(Error::UrlEscape(_))));
        assert!(matches!(unescape("abc%zz", true), Err(Error::UrlEscape(_))));
    }

    #[test]
    fn join_path_cases() {
        assert_eq!(
            join_path("https://example.com/foo", &["bar".into(), "baz".into()]),
            "https://example.com/foo/bar/baz"
        );
        assert_eq!(
            join_path("https://example.com", &["INDEX.HTML".into()]),
            "https://example.com/INDEX.HTML"
        );
        assert_eq!(
            join_path("https://example.com/a/", &["../b".into()]),
            "https://example.com/b"
        );
        assert_eq!(join_path("https://example.com", &[]), "https://example.com/");
        assert_eq!(join_path("/a", &["b".into()]), "/a/b");
    }
}
