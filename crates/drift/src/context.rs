use indexmap::IndexMap;

use crate::{Error, Result};

/// Ancestor metadata threaded top-down through a reconciliation.
///
/// A context is a value, not a reference: each recursion level derives a new
/// one by [extending](Context::with) its parent's, so a deeply nested object
/// can construct a fully-qualified action without re-discovering its
/// ancestry. Parents and sibling subtrees never observe each other's
/// extensions.
///
/// The engine never inspects the entries — it only threads the context
/// through. Only [`Diffable`](crate::Diffable) implementations read from it,
/// and only they decide what to expose to their children via
/// [`child_context`](crate::Diffable::child_context).
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: IndexMap<String, String>,
}

impl Context {
    /// Create an empty root context.
    ///
    /// A caller-supplied root context must already contain whatever ancestor
    /// information has no in-tree representation (e.g. a database name); the
    /// engine performs no enrichment beyond propagation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new context extending this one with `key` → `value`.
    ///
    /// An existing entry for `key` is shadowed in the returned context; this
    /// context itself is left untouched.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Look up an ancestor entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up an ancestor entry that the contract requires to be present.
    ///
    /// Returns [`Error::MissingContext`] when the entry was never provided —
    /// a caller error, since ancestors (or the root context) are responsible
    /// for exposing it.
    pub fn require(&self, key: &'static str) -> Result<&str> {
        self.get(key).ok_or(Error::MissingContext { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_does_not_mutate_parent() {
        let root = Context::new().with("schema", "public");
        let child = root.with("table", "account");

        assert_eq!(root.get("table"), None);
        assert_eq!(child.get("schema"), Some("public"));
        assert_eq!(child.get("table"), Some("account"));
    }

    #[test]
    fn test_with_shadows_existing_entry() {
        let outer = Context::new().with("schema", "public");
        let inner = outer.with("schema", "audit");

        assert_eq!(outer.get("schema"), Some("public"));
        assert_eq!(inner.get("schema"), Some("audit"));
    }

    #[test]
    fn test_require_reports_missing_entry() {
        let ctx = Context::new();
        let err = ctx.require("schema").unwrap_err();
        assert!(matches!(err, Error::MissingContext { key: "schema" }));
    }
}
