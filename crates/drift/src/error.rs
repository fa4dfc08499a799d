use thiserror::Error;

/// Errors surfaced while reconciling two catalog snapshots.
///
/// Every variant is a contract violation — by the caller (malformed input,
/// incomplete root context) or by a [`Diffable`](crate::Diffable)
/// implementation (cross-kind comparison). Reconciling two consistent,
/// well-typed snapshots cannot fail, and empty input is a normal case, not
/// an error. Any error aborts the entire diff call with no partial action
/// list: a consumer executing a truncated plan could leave the target schema
/// inconsistent, so aborting is strictly better.
#[derive(Debug, Error)]
pub enum Error {
    /// A node received a matched counterpart of an incompatible kind.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Two nodes within one input list share an identity.
    #[error("duplicate identity among {kind} nodes in the {side} snapshot")]
    DuplicateIdentity {
        side: &'static str,
        kind: &'static str,
    },

    /// A node needed an ancestor entry its context never provided.
    #[error("missing {key:?} entry in context")]
    MissingContext { key: &'static str },
}
