//! Named templates and the top-level execution wrapper.
//!
//! A template is literal text with `$[ expr ]` substitutions; `$$`
//! yields a literal dollar sign. Rendering streams into the caller's
//! sink, so whatever was written before a raise survives it.

use std::collections::HashMap;
use std::fmt;

use crate::caps::{Allowed, FuncSet};
use crate::engine::expr::{self, Eval, Expr};
use crate::error::Error;
use crate::value::Value;

enum Segment {
    Text(String),
    Expr(Expr),
}

/// A store of named template bodies, parsed once at definition time.
#[derive(Default)]
pub struct Template {
    bodies: HashMap<String, Vec<Segment>>,
}

impl Template {
    pub fn new() -> Self {
        Template {
            bodies: HashMap::new(),
        }
    }

    /// Parse and register a template body under `name`. Redefinition
    /// replaces the previous body.
    pub fn define(&mut self, name: &str, src: &str) -> Result<(), Error> {
        let segments = parse_segments(src)?;
        self.bodies.insert(name.to_owned(), segments);
        Ok(())
    }

    /// Render a named template into `out`, intercepting the early
    /// return signal: the returned value is appended to whatever was
    /// already written and the execution reports success. A raised
    /// error surfaces as-is, with the partial output preserved in
    /// `out`.
    pub fn execute(
        &self,
        caps: &FuncSet,
        name: &str,
        data: &Value,
        out: &mut dyn fmt::Write,
    ) -> Result<(), Error> {
        match self.render_into(name, caps, data, out) {
            Err(Error::Return(v)) => {
                write!(out, "{v}")?;
                Ok(())
            }
            other => other,
        }
    }

    // Rendering without the top-level interception; `tmpl.exec` uses
    // this to let returns reach its own boundary.
    pub(crate) fn render_into(
        &self,
        name: &str,
        caps: &FuncSet,
        data: &Value,
        out: &mut dyn fmt::Write,
    ) -> Result<(), Error> {
        let body = self
            .bodies
            .get(name)
            .ok_or_else(|| Error::NoSuchTemplate(name.to_owned()))?;
        let eval = Eval {
            caps,
            templates: self,
            data,
        };
        for segment in body {
            match segment {
                Segment::Text(text) => out.write_str(text)?,
                Segment::Expr(e) => {
                    let v = eval.eval(e)?;
                    if !matches!(v, Value::Null) {
                        write!(out, "{v}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Build a capability set from `allowed`, run `src` as a one-off
/// template against `data`, and collect the output.
pub fn quick_execute(
    src: &str,
    data: &Value,
    allowed: &[&dyn Allowed],
) -> Result<String, Error> {
    let caps = FuncSet::new(allowed);
    let mut templates = Template::new();
    templates.define("template", src)?;
    let mut out = String::new();
    templates.execute(&caps, "template", data, &mut out)?;
    Ok(out)
}

fn parse_segments(src: &str) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            text.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                text.push('$');
            }
            Some('[') => {
                chars.next();
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                let mut expr_src = String::new();
                let mut depth = 1usize;
                let mut closed = false;
                for ec in chars.by_ref() {
                    match ec {
                        '[' => {
                            depth += 1;
                            expr_src.push(ec);
                        }
                        ']' => {
                            depth -= 1;
                            if depth == 0 {
                                closed = true;
                                break;
                            }
                            expr_src.push(ec);
                        }
                        _ => expr_src.push(ec),
                    }
                }
                if !closed {
                    return Err(Error::Parse("unclosed $[ expression".into()));
                }
                segments.push(Segment::Expr(expr::parse(&expr_src)?));
            }
            _ => text.push('$'),
        }
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funcs;

    #[test]
    fn plain_text_and_escapes() {
        let got = quick_execute("cost: $$5 $[1] x", &Value::Null, &[]).unwrap();
        assert_eq!(got, "cost: $5 1 x");
    }

    #[test]
    fn null_renders_empty() {
        let got = quick_execute("a$[null]b$[missing]c", &Value::Null, &[]).unwrap();
        assert_eq!(got, "abc");
    }

    #[test]
    fn unclosed_expression_fails_to_define() {
        assert!(matches!(
            quick_execute("a $[1 + ", &Value::Null, &[]),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn join_and_lowercase_scenario() {
        let data = Value::record([
            ("base", Value::Str("https://example.com".into())),
            ("file", Value::Str("INDEX.HTML".into())),
        ]);
        let got = quick_execute(
            "$[strings.toLower(url.joinPath(base, file))]",
            &data,
            &[&funcs::STRINGS, &funcs::URL_JOIN_PATH],
        )
        .unwrap();
        assert_eq!(got, "https://example.com/index.html");
    }

    #[test]
    fn denied_operation_names_the_pair() {
        let err = quick_execute(
            "$[url.pathEscape(\"x y\")]",
            &Value::Null,
            &[&funcs::STRINGS, &funcs::URL_JOIN_PATH],
        )
        .unwrap_err();
        match err {
            Error::NotAllowed(f) => {
                assert_eq!(f.namespace, "url");
                assert_eq!(f.name, "pathEscape");
            }
            other => panic!("expected NotAllowed, got {other:?}"),
        }
    }

    #[test]
    fn top_level_return_appends_to_partial_output() {
        let got = quick_execute("a $[return(\"b\")] never", &Value::Null, &[]).unwrap();
        assert_eq!(got, "a b");
    }

    #[test]
    fn sub_template_return_becomes_call_result() {
        let caps = FuncSet::new(&[&funcs::TMPL]);
        let mut templates = Template::new();
        templates
            .define("getName", "$[return(\"Anonymous\")] unreachable")
            .unwrap();
        templates
            .define("main", "Welcome, $[tmpl.exec(\"getName\", .)]!")
            .unwrap();
        let mut out = String::new();
        templates
            .execute(&caps, "main", &Value::Null, &mut out)
            .unwrap();
        assert_eq!(out, "Welcome, Anonymous!");
    }

    #[test]
    fn raise_preserves_partial_output() {
        let caps = FuncSet::new(&[]);
        let mut templates = Template::new();
        templates
            .define("t", "before $[error(\"boom\", 7)] after")
            .unwrap();
        let mut out = String::new();
        let err = templates
            .execute(&caps, "t", &Value::Null, &mut out)
            .unwrap_err();
        assert_eq!(out, "before ");
        assert!(matches!(
            err,
            Error::Custom { message, payload: Value::Int(7) } if message == "boom"
        ));
    }

    #[test]
    fn raise_inside_sub_template_reaches_the_top() {
        let caps = FuncSet::new(&[&funcs::TMPL]);
        let mut templates = Template::new();
        templates.define("inner", "$[error(\"nested\")]").unwrap();
        templates
            .define("outer", "x $[tmpl.exec(\"inner\")] y")
            .unwrap();
        let mut out = String::new();
        let err = templates
            .execute(&caps, "outer", &Value::Null, &mut out)
            .unwrap_err();
        assert_eq!(out, "x ");
        assert!(matches!(err, Error::Custom { message, .. } if message == "nested"));
    }

    #[test]
    fn missing_template() {
        let templates = Template::new();
        let caps = FuncSet::new(&[]);
        let mut out = String::new();
        assert!(matches!(
            templates.execute(&caps, "nope", &Value::Null, &mut out),
            Err(Error::NoSuchTemplate(_))
        ));
    }

    #[test]
    fn unknown_capabilities_are_dropped_not_fatal() {
        let bogus = crate::caps::Func::new("nope", "op");
        let got = quick_execute(
            "$[strings.toLower(\"ABC\")]",
            &Value::Null,
            &[&funcs::STRINGS, &bogus],
        )
        .unwrap();
        assert_eq!(got, "abc");
    }
}
