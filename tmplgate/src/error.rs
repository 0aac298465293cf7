//! Crate-wide error type.
//!
//! The non-local control signals (`Return`, `Custom`) travel this enum
//! too: they use the ordinary `Result` channel and are told apart from
//! genuine failures by matching on the variant, never by content.

use crate::caps::Func;
use crate::value::{Kind, Value};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The capability set does not permit this function.
    #[error("function {0} is not allowed")]
    NotAllowed(Func),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Mixed-kind lists have no total order.
    #[error("cannot sort a list of mixed kinds")]
    CannotSortAnyList,

    /// Mixed-kind lists have no usable equality for deduplication.
    #[error("cannot compact a list of mixed kinds")]
    CannotCompactAnyList,

    #[error("expected a list, got {0}")]
    NotAList(Kind),

    #[error("expected a map, got {0}")]
    NotAMap(Kind),

    /// Early-return signal carrying the value to substitute for the
    /// remainder of the evaluation. Intercepted by `Template::execute`
    /// and by `tmpl.exec`; never surfaced to callers.
    #[error("return")]
    Return(Value),

    /// Script-raised application error. Only the top-level wrapper
    /// stops it; sub-evaluations let it pass through.
    #[error("{message}")]
    Custom { message: String, payload: Value },

    #[error("undefined identifier {0:?}")]
    Undefined(String),

    #[error("unknown operation {namespace}.{operation}")]
    NoSuchOperation {
        namespace: String,
        operation: String,
    },

    #[error("no template named {0:?}")]
    NoSuchTemplate(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Arg(String),

    #[error("only one argument is allowed")]
    OnlyOneArgument,

    #[error("invalid URL escape {0:?}")]
    UrlEscape(String),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure modes of the coercion engine. Overflow is always an error;
/// conversions never wrap or saturate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    #[error("cannot convert {kind} to {target}")]
    UnsupportedKind { kind: Kind, target: &'static str },

    #[error("cannot parse {input:?} as {target}")]
    Unparseable {
        input: String,
        target: &'static str,
    },

    #[error("value {value} overflows {target}")]
    Overflow {
        value: String,
        target: &'static str,
    },
}
