//! Schema reconciliation core.
//!
//! Given a "before" and an "after" snapshot of a hierarchical database
//! catalog (schemas → tables → columns/indexes/…), [`diff`] computes the
//! minimal ordered sequence of DDL actions that transforms the before
//! snapshot into the after snapshot.
//!
//! The crate knows nothing about concrete catalog objects. Every kind of
//! schema object plugs in through the [`Diffable`] contract: compare against
//! a matching prior version, enumerate children, describe full removal, and
//! test identity equality. The engine only matches, recurses, and
//! concatenates — see [`diff`] for the ordering guarantees.
//!
//! # Example
//!
//! ```ignore
//! use drift::{Context, Diffable, diff};
//!
//! let before: Vec<&dyn Diffable> = old_snapshot.iter().map(|s| s as _).collect();
//! let after: Vec<&dyn Diffable> = new_snapshot.iter().map(|s| s as _).collect();
//!
//! let actions = diff(&before, &after, &Context::new())?;
//! for action in &actions {
//!     println!("{}", action.to_sql());
//! }
//! ```
//!
//! Executing the actions (transactions, batching, retries) is the caller's
//! responsibility; the only contract is that they are applied in the exact
//! order returned.

mod action;
mod context;
mod diff;
mod diffable;
mod error;

pub use action::{Action, render_sql};
pub use context::Context;
pub use diff::diff;
pub use diffable::Diffable;
pub use error::Error;

/// Result type for drift operations.
pub type Result<T> = std::result::Result<T, Error>;
