//! Capability descriptors and the immutable allow-set.
//!
//! A [`Func`] names one operation as a `(namespace, name)` pair; a
//! [`Bundle`] names a whole namespace. Anything implementing
//! [`Allowed`] can expand to a list of descriptors, and a [`FuncSet`]
//! is the deduplicated union of those expansions. The set never changes
//! after construction and holds no interior mutability, so it can be
//! shared freely across concurrent evaluations.

use std::collections::HashSet;
use std::fmt;

use crate::error::Error;
use crate::funcs;

/// Descriptor for a single gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Func {
    pub namespace: &'static str,
    pub name: &'static str,
}

impl Func {
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Func { namespace, name }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Descriptor for every registered operation of one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle(pub &'static str);

/// Expansion of a capability descriptor into concrete functions.
pub trait Allowed {
    fn functions(&self) -> Vec<Func>;
}

impl Allowed for Func {
    fn functions(&self) -> Vec<Func> {
        vec![*self]
    }
}

impl Allowed for Bundle {
    fn functions(&self) -> Vec<Func> {
        funcs::by_namespace(self.0)
    }
}

impl Allowed for Vec<Func> {
    fn functions(&self) -> Vec<Func> {
        self.clone()
    }
}

impl Allowed for &[Func] {
    fn functions(&self) -> Vec<Func> {
        self.to_vec()
    }
}

/// The immutable allow-set consulted by every gated operation.
#[derive(Debug, Clone, Default)]
pub struct FuncSet {
    allowed: HashSet<Func>,
    namespaces: HashSet<&'static str>,
}

impl FuncSet {
    /// Union of all expansions, deduplicated. Descriptors that do not
    /// name a registered operation are dropped without error.
    pub fn new(sources: &[&dyn Allowed]) -> Self {
        let mut allowed = HashSet::new();
        for source in sources {
            for f in source.functions() {
                match funcs::find(f.namespace, f.name) {
                    Some(registered) => {
                        allowed.insert(registered);
                    }
                    None => log::debug!("ignoring unknown function {f}"),
                }
            }
        }
        let namespaces = allowed.iter().map(|f| f.namespace).collect();
        FuncSet {
            allowed,
            namespaces,
        }
    }

    /// Exact-pair membership.
    pub fn allows(&self, f: Func) -> bool {
        self.allowed.contains(&f)
    }

    /// Whether at least one operation of the namespace is permitted.
    /// Namespaces outside this set resolve as undefined identifiers.
    pub fn exposes(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub(crate) fn check(&self, f: Func) -> Result<(), Error> {
        if self.allows(f) {
            Ok(())
        } else {
            Err(Error::NotAllowed(f))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
