//! Template evaluation: the expression language and the named-template
//! store with its top-level execution wrapper.

pub(crate) mod expr;
pub mod template;
