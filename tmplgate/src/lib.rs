//! Capability-gated function surface for untrusted templates.
//!
//! Templates only ever reach host functionality through namespaced
//! operations (`strings.toLower`, `url.joinPath`, ...), and every
//! operation consults an immutable allow-set before doing anything.
//! A namespace with no permitted operation is invisible to scripts;
//! a visible namespace still denies each operation individually.
//!
//! ```
//! use tmplgate::{funcs, quick_execute, Value};
//!
//! let data = Value::record([("name", Value::from("world"))]);
//! let out = quick_execute(
//!     "Hello $[strings.toUpper(name)]!",
//!     &data,
//!     &[&funcs::STRINGS],
//! )
//! .unwrap();
//! assert_eq!(out, "Hello WORLD!");
//! ```
//!
//! Scripts can cut an evaluation short with `return(value)` (the value
//! becomes part of the successful output) or abort it with
//! `error(message)` (surfaced to the host as [`Error::Custom`], with
//! the partial output preserved).

mod caps;
mod engine;
mod error;
mod fns;
mod list;
mod value;

pub mod conv;
pub mod funcs;

pub use caps::{Allowed, Bundle, Func, FuncSet};
pub use engine::template::{quick_execute, Template};
pub use error::{CoercionError, Error, Result};
pub use value::{Kind, Value};
