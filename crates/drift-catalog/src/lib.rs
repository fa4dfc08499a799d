//! PostgreSQL catalog kinds for the drift reconciliation engine.
//!
//! This crate supplies the concrete schema-object kinds — schemas, tables,
//! columns, indexes, enum types and their values — that plug into the
//! generic [`Diffable`] contract, plus the [DDL actions](ddl) they emit.
//!
//! Identity is always the catalog OID (the attribute number for columns),
//! never the name: a renamed object keeps its identity, and the diff is a
//! rename, not a drop plus a create.
//!
//! # Example
//!
//! ```
//! use drift_catalog::{Class, SchemaDef, reconcile};
//!
//! let before = vec![SchemaDef::new("2200", "public")];
//! let after = vec![
//!     SchemaDef::new("2200", "public")
//!         .with_classes(vec![Class::new("16400", "account")]),
//! ];
//!
//! let actions = reconcile(&before, &after).unwrap();
//! assert_eq!(actions[0].to_sql(), "CREATE TABLE \"public\".\"account\" ();");
//! ```
//!
//! Snapshot construction is the caller's job — load it from the target's
//! catalog tables, decode it from a replicated event stream, or build it by
//! hand as above; this crate never opens a connection.

pub mod ddl;

mod attribute;
mod class;
mod enums;
mod index;
mod schema;

pub use attribute::Attribute;
pub use class::Class;
pub use enums::{EnumType, EnumValue};
pub use index::Index;
pub use schema::SchemaDef;

use drift::{Action, Context, Diffable, Error, Result};

/// Context entry naming the enclosing schema.
pub(crate) const KEY_SCHEMA: &str = "schema";
/// Context entry naming the enclosing table.
pub(crate) const KEY_TABLE: &str = "table";
/// Context entry naming the enclosing enum type.
pub(crate) const KEY_TYPE: &str = "type";

/// Downcast a matched prior to the expected kind, or report the contract
/// violation. The engine only pairs nodes that matched via identity, so a
/// failure here means an implementation bug, never bad input data.
pub(crate) fn expect_kind<'a, T: 'static>(
    node: &'a dyn Diffable,
    expected: &'static str,
) -> Result<&'a T> {
    node.as_any()
        .downcast_ref::<T>()
        .ok_or(Error::KindMismatch {
            expected,
            found: node.kind(),
        })
}

/// Reconcile two top-level schema snapshots into an ordered DDL plan.
///
/// `before` is the target's current state, `after` the desired state; the
/// returned actions transform one into the other when executed in order.
pub fn reconcile(before: &[SchemaDef], after: &[SchemaDef]) -> Result<Vec<Box<dyn Action>>> {
    reconcile_with(before, after, &Context::new())
}

/// Reconcile under a caller-supplied root context.
///
/// Use this when ancestor information with no in-tree representation (e.g.
/// the database name) must reach the actions.
pub fn reconcile_with(
    before: &[SchemaDef],
    after: &[SchemaDef],
    ctx: &Context,
) -> Result<Vec<Box<dyn Action>>> {
    let pre: Vec<&dyn Diffable> = before.iter().map(|s| s as &dyn Diffable).collect();
    let post: Vec<&dyn Diffable> = after.iter().map(|s| s as &dyn Diffable).collect();
    let actions = drift::diff(&pre, &post, ctx)?;
    tracing::debug!(actions = actions.len(), "planned");
    Ok(actions)
}
