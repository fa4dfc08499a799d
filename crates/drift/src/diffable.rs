use std::any::Any;

use crate::{Action, Context, Result};

/// The polymorphic contract every schema-object kind implements.
///
/// Concrete kinds (schema, table, column, enum, index, …) are plug-ins; the
/// [`diff`](crate::diff) engine operates purely in terms of this trait.
///
/// # Identity vs. content
///
/// [`is_equal`](Diffable::is_equal) compares *identity* — a stable,
/// catalog-assigned key meaning "the same underlying object across time" —
/// never descriptive attributes. Two nodes with equal identity may still
/// differ in content (that is what [`diff`](Diffable::diff) reports); two
/// nodes with different identities are never "the same object that changed",
/// only a drop of one plus a create of the other.
///
/// # Failure semantics
///
/// The engine only hands a node a prior that matched it via `is_equal`, so a
/// failed downcast inside [`diff`](Diffable::diff) is a programming error.
/// Implementations must reject it with
/// [`Error::KindMismatch`](crate::Error::KindMismatch) rather than guess or
/// silently return an empty diff.
pub trait Diffable {
    /// A short tag naming this kind of object, used in diagnostics and
    /// contract-violation errors.
    fn kind(&self) -> &'static str;

    /// Downcast support for implementations comparing against a prior.
    fn as_any(&self) -> &dyn Any;

    /// Actions bringing *this node alone* — not its children — up to date
    /// with respect to `prior`.
    ///
    /// With `prior == None` (the node is new), the returned sequence must
    /// fully describe the node: the engine never recurses into a created
    /// node's children, so e.g. a create-table action embeds its column
    /// list instead of relying on per-column create actions.
    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>>;

    /// The node's direct children, in order.
    fn children(&self, ctx: &Context) -> Vec<&dyn Diffable>;

    /// Actions removing this node entirely.
    ///
    /// Implementations may assume removal cascades to contained children at
    /// execution time, and should not enumerate child drops.
    fn drop_actions(&self, ctx: &Context) -> Result<Vec<Box<dyn Action>>>;

    /// Identity comparison. Never considers descriptive attributes, and is
    /// `false` across kinds: mixed-kind lists are normal (a schema's
    /// children are both types and tables), and a different kind simply
    /// means "not the same object".
    fn is_equal(&self, other: &dyn Diffable) -> bool;

    /// The context this node exposes to its own children.
    ///
    /// Called by the engine on the post-side node of a matched pair before
    /// recursing, so child actions reference post-side (renamed) ancestry.
    /// The default exposes the parent context unchanged.
    fn child_context(&self, ctx: &Context) -> Context {
        ctx.clone()
    }
}
