//! The coercion engine: type-directed conversion between value kinds.
//!
//! Text inputs get thousands-separator commas stripped, then an integer
//! literal parse honoring `0x`/`0o`/`0b` and leading-zero octal
//! prefixes, then a float literal fallback truncated toward zero for
//! integer targets. Every conversion range-checks the target width;
//! out-of-range inputs fail with an overflow error instead of wrapping.

use crate::error::CoercionError;
use crate::value::Value;

type Result<T> = std::result::Result<T, CoercionError>;

// ── Boolean and string targets (total) ────────────────────────────────────────

/// Coerce to boolean. The textual vocabulary `1`/`t`/`true`/`yes`
/// (case-insensitive) is true; any other text and every numeric kind
/// falls back to "exactly one is true".
pub fn to_bool(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Str(s) => {
            let s = s.trim();
            if matches!(
                s.to_ascii_lowercase().as_str(),
                "1" | "t" | "true" | "yes"
            ) {
                return true;
            }
            text_to_f64(&clean_numeric(s)).map(|x| x == 1.0).unwrap_or(false)
        }
        other => other.num_f64().map(|x| x == 1.0).unwrap_or(false),
    }
}

/// Coerce to the rendered string form.
pub fn to_string(v: &Value) -> String {
    v.to_string()
}

// ── Integer targets ───────────────────────────────────────────────────────────

pub fn to_i8(v: &Value) -> Result<i8> {
    Ok(int_from(v, "int8", i8::MIN as i128, i8::MAX as i128)? as i8)
}

pub fn to_i16(v: &Value) -> Result<i16> {
    Ok(int_from(v, "int16", i16::MIN as i128, i16::MAX as i128)? as i16)
}

pub fn to_i32(v: &Value) -> Result<i32> {
    Ok(int_from(v, "int32", i32::MIN as i128, i32::MAX as i128)? as i32)
}

pub fn to_i64(v: &Value) -> Result<i64> {
    Ok(int_from(v, "int64", i64::MIN as i128, i64::MAX as i128)? as i64)
}

/// Platform-width signed integer, fixed at 64 bits on every target.
pub fn to_int(v: &Value) -> Result<i64> {
    Ok(int_from(v, "int", i64::MIN as i128, i64::MAX as i128)? as i64)
}

pub fn to_u8(v: &Value) -> Result<u8> {
    Ok(int_from(v, "uint8", 0, u8::MAX as i128)? as u8)
}

pub fn to_u16(v: &Value) -> Result<u16> {
    Ok(int_from(v, "uint16", 0, u16::MAX as i128)? as u16)
}

pub fn to_u32(v: &Value) -> Result<u32> {
    Ok(int_from(v, "uint32", 0, u32::MAX as i128)? as u32)
}

pub fn to_u64(v: &Value) -> Result<u64> {
    Ok(int_from(v, "uint64", 0, u64::MAX as i128)? as u64)
}

/// Platform-width unsigned integer, fixed at 64 bits on every target.
pub fn to_uint(v: &Value) -> Result<u64> {
    Ok(int_from(v, "uint", 0, u64::MAX as i128)? as u64)
}

// ── Float targets ─────────────────────────────────────────────────────────────

pub fn to_f64(v: &Value) -> Result<f64> {
    match v {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Str(s) => {
            text_to_f64(&clean_numeric(s)).ok_or_else(|| CoercionError::Unparseable {
                input: s.clone(),
                target: "float64",
            })
        }
        other => other.num_f64().ok_or(CoercionError::UnsupportedKind {
            kind: other.kind(),
            target: "float64",
        }),
    }
}

pub fn to_f32(v: &Value) -> Result<f32> {
    let x = match to_f64(v) {
        Ok(x) => x,
        Err(CoercionError::UnsupportedKind { kind, .. }) => {
            return Err(CoercionError::UnsupportedKind {
                kind,
                target: "float32",
            })
        }
        Err(CoercionError::Unparseable { input, .. }) => {
            return Err(CoercionError::Unparseable {
                input,
                target: "float32",
            })
        }
        Err(e) => return Err(e),
    };
    if x.is_finite() && x.abs() > f64::from(f32::MAX) {
        return Err(CoercionError::Overflow {
            value: v.to_string(),
            target: "float32",
        });
    }
    Ok(x as f32)
}

// ── Batch variants ────────────────────────────────────────────────────────────
//
// Element-wise over a slice, failing on the first failing element with
// no partial result.

pub fn to_bools(vs: &[Value]) -> Vec<bool> {
    vs.iter().map(to_bool).collect()
}

pub fn to_strings(vs: &[Value]) -> Vec<String> {
    vs.iter().map(to_string).collect()
}

pub fn to_i8s(vs: &[Value]) -> Result<Vec<i8>> {
    vs.iter().map(to_i8).collect()
}

pub fn to_i16s(vs: &[Value]) -> Result<Vec<i16>> {
    vs.iter().map(to_i16).collect()
}

pub fn to_i32s(vs: &[Value]) -> Result<Vec<i32>> {
    vs.iter().map(to_i32).collect()
}

pub fn to_i64s(vs: &[Value]) -> Result<Vec<i64>> {
    vs.iter().map(to_i64).collect()
}

pub fn to_ints(vs: &[Value]) -> Result<Vec<i64>> {
    vs.iter().map(to_int).collect()
}

pub fn to_u8s(vs: &[Value]) -> Result<Vec<u8>> {
    vs.iter().map(to_u8).collect()
}

pub fn to_u16s(vs: &[Value]) -> Result<Vec<u16>> {
    vs.iter().map(to_u16).collect()
}

pub fn to_u32s(vs: &[Value]) -> Result<Vec<u32>> {
    vs.iter().map(to_u32).collect()
}

pub fn to_u64s(vs: &[Value]) -> Result<Vec<u64>> {
    vs.iter().map(to_u64).collect()
}

pub fn to_uints(vs: &[Value]) -> Result<Vec<u64>> {
    vs.iter().map(to_uint).collect()
}

pub fn to_f32s(vs: &[Value]) -> Result<Vec<f32>> {
    vs.iter().map(to_f32).collect()
}

pub fn to_f64s(vs: &[Value]) -> Result<Vec<f64>> {
    vs.iter().map(to_f64).collect()
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Widen any integer-representable value to `i128`, then range-check.
fn int_from(v: &Value, target: &'static str, min: i128, max: i128) -> Result<i128> {
    let wide = match v {
        Value::Str(s) => {
            let cleaned = clean_numeric(s);
            if let Some(n) = parse_int_text(&cleaned) {
                n
            } else if let Ok(x) = cleaned.parse::<f64>() {
                float_to_wide(x, v, target)?
            } else {
                return Err(CoercionError::Unparseable {
                    input: s.clone(),
                    target,
                });
            }
        }
        Value::F32(x) => float_to_wide(f64::from(*x), v, target)?,
        Value::F64(x) => float_to_wide(*x, v, target)?,
        other => match other.int_key() {
            Some(n) => n,
            None => {
                return Err(CoercionError::UnsupportedKind {
                    kind: other.kind(),
                    target,
                })
            }
        },
    };
    if wide < min || wide > max {
        return Err(CoercionError::Overflow {
            value: v.to_string(),
            target,
        });
    }
    Ok(wide)
}

// Truncation toward zero; the saturating cast is caught by the caller's
// range check.
fn float_to_wide(x: f64, v: &Value, target: &'static str) -> Result<i128> {
    if !x.is_finite() {
        return Err(CoercionError::Overflow {
            value: v.to_string(),
            target,
        });
    }
    Ok(x.trunc() as i128)
}

fn clean_numeric(s: &str) -> String {
    s.trim().replace(',', "")
}

// Integer literal first so prefixed radixes win, then a float literal.
// "017" is octal 15, not 17.0.
fn text_to_f64(cleaned: &str) -> Option<f64> {
    if let Some(n) = parse_int_text(cleaned) {
        return Some(n as f64);
    }
    cleaned.parse::<f64>().ok()
}

/// Integer literal parse with prefix radix detection: `0x` hex, `0b`
/// binary, `0o` or a bare leading zero octal, decimal otherwise.
fn parse_int_text(s: &str) -> Option<i128> {
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() {
        return None;
    }
    let (radix, digits) = if let Some(rest) = strip_prefix2(digits, "0x", "0X") {
        (16, rest)
    } else if let Some(rest) = strip_prefix2(digits, "0b", "0B") {
        (2, rest)
    } else if let Some(rest) = strip_prefix2(digits, "0o", "0O") {
        (8, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Some(if neg { -magnitude } else { magnitude })
}

fn strip_prefix2<'a>(s: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
    s.strip_prefix(lower).or_else(|| s.strip_prefix(upper))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
