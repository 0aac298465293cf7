//! Expression language used inside `$[ ... ]` substitutions.
//!
//! Deliberately small: literals, data fields, namespaced calls,
//! equality, boolean connectives, and a lazy ternary. The always
//! present bare calls `return(..)` and `error(..)` produce the
//! non-local control signals.

use crate::caps::FuncSet;
use crate::conv;
use crate::engine::template::Template;
use crate::error::Error;
use crate::fns;
use crate::funcs;
use crate::value::Value;

// ── Lexer ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Dot,
    Comma,
    LParen,
    RParen,
    Question,
    Colon,
    Bang,
    EqEq,
    BangEq,
    AndAnd,
    OrOr,
    Minus,
    Eof,
}

fn tokenize(src: &str) -> Result<Vec<Token>, Error> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '?' => {
                tokens.push(Token::Question);
                i += 1;
            }
            ':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::BangEq);
                    i += 2;
                } else {
                    tokens.push(Token::Bang);
                    i += 1;
                }
            }
            '=' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::EqEq);
                    i += 2;
                } else {
                    return Err(Error::Parse("single '=' is not an operator".into()));
                }
            }
            '&' => {
                if chars.get(i + 1) == Some(&'&') {
                    tokens.push(Token::AndAnd);
                    i += 2;
                } else {
                    return Err(Error::Parse("expected '&&'".into()));
                }
            }
            '|' => {
                if chars.get(i + 1) == Some(&'|') {
                    tokens.push(Token::OrOr);
                    i += 2;
                } else {
                    return Err(Error::Parse("expected '||'".into()));
                }
            }
            '"' => {
                let mut s = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(Error::Parse("unterminated string literal".into())),
                        Some('"') => {
                            i += 1;
                            break;
                        }
                        Some('\\') => {
                            let escaped = match chars.get(i + 1) {
                                Some('"') => '"',
                                Some('\\') => '\\',
                                Some('n') => '\n',
                                Some('t') => '\t',
                                Some('r') => '\r',
                                other => {
                                    return Err(Error::Parse(format!(
                                        "unknown string escape {other:?}"
                                    )))
                                }
                            };
                            s.push(escaped);
                            i += 2;
                        }
                        Some(&c) => {
                            s.push(c);
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::Str(s));
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while matches!(chars.get(i), Some(c) if c.is_ascii_digit()) {
                    i += 1;
                }
                let mut is_float = false;
                if chars.get(i) == Some(&'.')
                    && matches!(chars.get(i + 1), Some(c) if c.is_ascii_digit())
                {
                    is_float = true;
                    i += 1;
                    while matches!(chars.get(i), Some(c) if c.is_ascii_digit()) {
                        i += 1;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                if is_float {
                    let x = text
                        .parse::<f64>()
                        .map_err(|e| Error::Parse(format!("bad float literal {text:?}: {e}")))?;
                    tokens.push(Token::Float(x));
                } else {
                    let n = text
                        .parse::<i64>()
                        .map_err(|e| Error::Parse(format!("bad int literal {text:?}: {e}")))?;
                    tokens.push(Token::Int(n));
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while matches!(chars.get(i), Some(c) if c.is_alphanumeric() || *c == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(Error::Parse(format!("unexpected character {other:?}"))),
        }
    }
    tokens.push(Token::Eof);
    Ok(tokens)
}

// ── Parser ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    Root,
    Var(String),
    Field(Box<Expr>, String),
    Call(String, Vec<Expr>),
    NsCall(String, String, Vec<Expr>),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

pub(crate) fn parse(src: &str) -> Result<Expr, Error> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.ternary()?;
    if parser.peek() != &Token::Eof {
        return Err(Error::Parse(format!(
            "trailing input after expression: {:?}",
            parser.peek()
        )));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn next(&mut self) -> Token {
        let t = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        t
    }

    fn expect(&mut self, want: &Token, what: &str) -> Result<(), Error> {
        let got = self.next();
        if &got == want {
            Ok(())
        } else {
            Err(Error::Parse(format!("expected {what}, got {got:?}")))
        }
    }

    fn ternary(&mut self) -> Result<Expr, Error> {
        let cond = self.or_expr()?;
        if self.peek() == &Token::Question {
            self.next();
            let then = self.ternary()?;
            self.expect(&Token::Colon, "':'")?;
            let otherwise = self.ternary()?;
            return Ok(Expr::Ternary(
                Box::new(cond),
                Box::new(then),
                Box::new(otherwise),
            ));
        }
        Ok(cond)
    }

    fn or_expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.and_expr()?;
        while self.peek() == &Token::OrOr {
            self.next();
            let right = self.and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.equality()?;
        while self.peek() == &Token::AndAnd {
            self.next();
            let right = self.equality()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expr, Error> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Token::EqEq => {
                    self.next();
                    let right = self.unary()?;
                    left = Expr::Eq(Box::new(left), Box::new(right));
                }
                Token::BangEq => {
                    self.next();
                    let right = self.unary()?;
                    left = Expr::Ne(Box::new(left), Box::new(right));
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, Error> {
        match self.peek() {
            Token::Bang => {
                self.next();
                Ok(Expr::Not(Box::new(self.unary()?)))
            }
            Token::Minus => {
                self.next();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Expr, Error> {
        let mut expr = self.primary()?;
        while self.peek() == &Token::Dot {
            self.next();
            let name = match self.next() {
                Token::Ident(name) => name,
                other => {
                    return Err(Error::Parse(format!(
                        "expected field or operation name, got {other:?}"
                    )))
                }
            };
            if self.peek() == &Token::LParen {
                let args = self.arguments()?;
                match expr {
                    Expr::Var(ns) => expr = Expr::NsCall(ns, name, args),
                    _ => {
                        return Err(Error::Parse(
                            "operations can only be called on a namespace".into(),
                        ))
                    }
                }
            } else {
                expr = Expr::Field(Box::new(expr), name);
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, Error> {
        match self.next() {
            Token::Int(n) => Ok(Expr::Literal(Value::Int(n))),
            Token::Float(x) => Ok(Expr::Literal(Value::F64(x))),
            Token::Str(s) => Ok(Expr::Literal(Value::Str(s))),
            Token::Dot => {
                // `.name` reads a field of the root data; a bare `.` is
                // the root itself.
                if matches!(self.peek(), Token::Ident(_)) {
                    if let Token::Ident(name) = self.next() {
                        return Ok(Expr::Field(Box::new(Expr::Root), name));
                    }
                }
                Ok(Expr::Root)
            }
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" => Ok(Expr::Literal(Value::Null)),
                _ => {
                    if self.peek() == &Token::LParen {
                        let args = self.arguments()?;
                        Ok(Expr::Call(name, args))
                    } else {
                        Ok(Expr::Var(name))
                    }
                }
            },
            Token::LParen => {
                let inner = self.ternary()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            other => Err(Error::Parse(format!("unexpected token {other:?}"))),
        }
    }

    // Caller has seen the '(' but not consumed it.
    fn arguments(&mut self) -> Result<Vec<Expr>, Error> {
        self.expect(&Token::LParen, "'('")?;
        let mut args = Vec::new();
        if self.peek() == &Token::RParen {
            self.next();
            return Ok(args);
        }
        loop {
            args.push(self.ternary()?);
            match self.next() {
                Token::Comma => {}
                Token::RParen => return Ok(args),
                other => {
                    return Err(Error::Parse(format!(
                        "expected ',' or ')' in arguments, got {other:?}"
                    )))
                }
            }
        }
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

pub(crate) struct Eval<'a> {
    pub caps: &'a FuncSet,
    pub templates: &'a Template,
    pub data: &'a Value,
}

impl Eval<'_> {
    pub fn eval(&self, e: &Expr) -> Result<Value, Error> {
        match e {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Root => Ok(self.data.clone()),
            Expr::Var(name) => Ok(field_of(self.data, name)),
            Expr::Field(base, name) => {
                let base = self.eval(base)?;
                Ok(field_of(&base, name))
            }
            Expr::Not(inner) => Ok(Value::Bool(!self.eval(inner)?.truthy())),
            Expr::Neg(inner) => negate(&self.eval(inner)?),
            Expr::Eq(a, b) => Ok(Value::Bool(self.eval(a)?.loose_eq(&self.eval(b)?))),
            Expr::Ne(a, b) => Ok(Value::Bool(!self.eval(a)?.loose_eq(&self.eval(b)?))),
            Expr::And(a, b) => {
                if !self.eval(a)?.truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(b)?.truthy()))
            }
            Expr::Or(a, b) => {
                if self.eval(a)?.truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(b)?.truthy()))
            }
            Expr::Ternary(cond, then, otherwise) => {
                if self.eval(cond)?.truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Expr::Call(name, args) => self.bare_call(name, args),
            Expr::NsCall(namespace, operation, args) => {
                // A namespace with no permitted operation is invisible:
                // referring to it is an undefined identifier, not a
                // permission failure.
                if !funcs::has_namespace(namespace) || !self.caps.exposes(namespace) {
                    return Err(Error::Undefined(namespace.clone()));
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                let env = fns::Env {
                    caps: self.caps,
                    templates: self.templates,
                };
                fns::call(&env, namespace, operation, values)
            }
        }
    }

    // `return` and `error` exist independently of the capability set.
    fn bare_call(&self, name: &str, args: &[Expr]) -> Result<Value, Error> {
        match name {
            "return" => {
                let value = match args.first() {
                    Some(arg) => self.eval(arg)?,
                    None => Value::Null,
                };
                Err(Error::Return(value))
            }
            "error" => {
                let message = match args.first() {
                    Some(arg) => conv::to_string(&self.eval(arg)?),
                    None => return Err(Error::Arg("error: argument 0 missing".into())),
                };
                let payload = match args.get(1) {
                    Some(arg) => self.eval(arg)?,
                    None => Value::Null,
                };
                Err(Error::Custom { message, payload })
            }
            _ => Err(Error::Undefined(name.to_owned())),
        }
    }
}

fn field_of(v: &Value, name: &str) -> Value {
    match v {
        Value::Map(entries) => entries.get(name).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn negate(v: &Value) -> Result<Value, Error> {
    match v {
        Value::F32(x) => Ok(Value::F64(-f64::from(*x))),
        Value::F64(x) => Ok(Value::F64(-x)),
        other => match conv::to_i64(other) {
            Ok(n) => match n.checked_neg() {
                Some(m) => Ok(Value::Int(m)),
                None => Ok(Value::F64(-(n as f64))),
            },
            Err(_) => Ok(Value::F64(-conv::to_f64(other)?)),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Allowed;

    struct Fixture {
        caps: FuncSet,
        templates: Template,
        data: Value,
    }

    impl Fixture {
        fn new(allowed: &[&dyn Allowed]) -> Self {
            Fixture {
                caps: FuncSet::new(allowed),
                templates: Template::new(),
                data: Value::record([
                    ("name", Value::Str("World".into())),
                    ("count", Value::Int(3)),
                    (
                        "user",
                        Value::record([("city", Value::Str("Berlin".into()))]),
                    ),
                ]),
            }
        }

        fn eval(&self, src: &str) -> Result<Value, Error> {
            let expr = parse(src)?;
            Eval {
                caps: &self.caps,
                templates: &self.templates,
                data: &self.data,
            }
            .eval(&expr)
        }
    }

    #[test]
    fn literals() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.eval("42").unwrap(), Value::Int(42));
        assert_eq!(fx.eval("2.5").unwrap(), Value::F64(2.5));
        assert_eq!(fx.eval("\"hi\\n\"").unwrap(), Value::Str("hi\n".into()));
        assert_eq!(fx.eval("true").unwrap(), Value::Bool(true));
        assert_eq!(fx.eval("null").unwrap(), Value::Null);
        assert_eq!(fx.eval("-7").unwrap(), Value::Int(-7));
    }

    #[test]
    fn data_access() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.eval("name").unwrap(), Value::Str("World".into()));
        assert_eq!(fx.eval("user.city").unwrap(), Value::Str("Berlin".into()));
        assert_eq!(fx.eval("missing").unwrap(), Value::Null);
        assert_eq!(fx.eval(".name").unwrap(), Value::Str("World".into()));
        assert!(matches!(fx.eval("."), Ok(Value::Map(_))));
    }

    #[test]
    fn operators() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.eval("count == 3").unwrap(), Value::Bool(true));
        assert_eq!(fx.eval("count != 3").unwrap(), Value::Bool(false));
        assert_eq!(fx.eval("!false").unwrap(), Value::Bool(true));
        assert_eq!(
            fx.eval("count == 3 && name == \"World\"").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            fx.eval("count == 4 || name == \"World\"").unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn short_circuit_skips_right_side() {
        let fx = Fixture::new(&[]);
        // The right side would fail as undefined if evaluated.
        assert_eq!(fx.eval("false && boom()").unwrap(), Value::Bool(false));
        assert_eq!(fx.eval("true || boom()").unwrap(), Value::Bool(true));
    }

    #[test]
    fn ternary_is_lazy() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.eval("true ? 1 : boom()").unwrap(), Value::Int(1));
        assert_eq!(
            fx.eval("count == 4 ? boom() : \"no\"").unwrap(),
            Value::Str("no".into())
        );
    }

    #[test]
    fn namespaced_call() {
        let fx = Fixture::new(&[&funcs::STRINGS]);
        assert_eq!(
            fx.eval("strings.toUpper(name)").unwrap(),
            Value::Str("WORLD".into())
        );
    }

    #[test]
    fn hidden_namespace_is_undefined() {
        let fx = Fixture::new(&[]);
        assert!(matches!(
            fx.eval("strings.toUpper(\"x\")"),
            Err(Error::Undefined(ns)) if ns == "strings"
        ));
        // Unknown namespaces read the same way.
        let fx = Fixture::new(&[&funcs::STRINGS]);
        assert!(matches!(
            fx.eval("nonsense.op(1)"),
            Err(Error::Undefined(_))
        ));
    }

    #[test]
    fn visible_namespace_denied_operation() {
        let fx = Fixture::new(&[&funcs::URL_JOIN_PATH]);
        assert!(matches!(
            fx.eval("url.pathEscape(\"x y\")"),
            Err(Error::NotAllowed(f)) if f == funcs::URL_PATH_ESCAPE
        ));
    }

    #[test]
    fn return_signal() {
        let fx = Fixture::new(&[]);
        assert!(matches!(
            fx.eval("return(\"early\")"),
            Err(Error::Return(Value::Str(s))) if s == "early"
        ));
        assert!(matches!(fx.eval("return()"), Err(Error::Return(Value::Null))));
    }

    #[test]
    fn error_signal() {
        let fx = Fixture::new(&[]);
        assert!(matches!(
            fx.eval("error(\"boom\", 42)"),
            Err(Error::Custom { message, payload: Value::Int(42) }) if message == "boom"
        ));
        assert!(fx.eval("error()").is_err());
    }

    #[test]
    fn parse_errors() {
        let fx = Fixture::new(&[]);
        assert!(matches!(fx.eval("1 ="), Err(Error::Parse(_))));
        assert!(matches!(fx.eval("\"open"), Err(Error::Parse(_))));
        assert!(matches!(fx.eval("(1"), Err(Error::Parse(_))));
        assert!(matches!(fx.eval("1 2"), Err(Error::Parse(_))));
    }
}
