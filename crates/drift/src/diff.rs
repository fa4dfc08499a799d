//! The reconciliation engine.
//!
//! [`diff`] walks two ordered lists of [`Diffable`] nodes — the same level
//! of a "before" (pre) and an "after" (post) snapshot — and produces the
//! ordered action sequence that reconciles them.
//!
//! ## Matching
//!
//! For each post node, the matching pre node is found by identity
//! ([`Diffable::is_equal`] is the sole predicate). Matching is a naive
//! linear scan per node: catalog trees are schema-sized, so O(n·m) per level
//! is a deliberate simplicity choice. Child lists are materialized once per
//! matched pair.
//!
//! ## Resolution
//!
//! - **New node** (no match in pre): the node's own create actions are
//!   emitted and its children are *not* visited — a kind's create is
//!   self-contained (see [`Diffable::diff`]).
//! - **Matched node**: the node's own change actions (possibly none) are
//!   emitted first, then the engine recurses into the two child lists under
//!   the node's [extended context](Diffable::child_context). A node's own
//!   actions therefore always precede its descendants' — a rename is emitted
//!   before any action referencing the new name.
//! - **Removed node** (no match in post): the node's drop actions are
//!   emitted and its children are *not* visited — removal cascades.
//!
//! ## Phase ordering
//!
//! Within one level, all actions for nodes present in post (created or
//! matched, in post order) precede all drop actions for nodes removed from
//! pre (in pre order). This two-phase order is a behavioral contract, not an
//! implementation detail. It deliberately does not try to interleave: a
//! create that depends on a sibling drop at the same level (e.g. reusing a
//! name the drop frees up) is not supported.
//!
//! Each invocation is a pure function of its inputs — no state survives a
//! call, so concurrent diffs over disjoint snapshots are inherently safe.

use tracing::debug;

use crate::{Action, Context, Diffable, Error, Result};

/// Reconcile one level of the catalog tree.
///
/// Returns the actions transforming `pre` into `post`, in execution order.
/// `ctx` is threaded into every node's [`diff`](Diffable::diff) and
/// [`drop_actions`](Diffable::drop_actions) call at this level; the engine
/// never reads it.
///
/// Duplicate identities within either list are rejected with
/// [`Error::DuplicateIdentity`] before any action is computed, and any
/// contract violation raised by a node aborts the whole call — no partial
/// action list is ever returned.
pub fn diff(
    pre: &[&dyn Diffable],
    post: &[&dyn Diffable],
    ctx: &Context,
) -> Result<Vec<Box<dyn Action>>> {
    diff_level(pre, post, ctx, 0)
}

fn diff_level(
    pre: &[&dyn Diffable],
    post: &[&dyn Diffable],
    ctx: &Context,
    depth: usize,
) -> Result<Vec<Box<dyn Action>>> {
    let _span = tracing::debug_span!(
        "reconcile",
        depth,
        pre = pre.len(),
        post = post.len(),
    )
    .entered();

    reject_duplicates(pre, "pre")?;
    reject_duplicates(post, "post")?;

    let mut actions: Vec<Box<dyn Action>> = Vec::new();
    let mut consumed = vec![false; pre.len()];

    for &node in post {
        match pre.iter().position(|&p| node.is_equal(p)) {
            None => {
                debug!(kind = node.kind(), "create");
                actions.extend(node.diff(None, ctx)?);
                // No recursion: the create above fully describes the node,
                // children included.
            }
            Some(i) => {
                consumed[i] = true;
                let prior = pre[i];
                debug!(kind = node.kind(), "match");
                actions.extend(node.diff(Some(prior), ctx)?);

                let child_ctx = node.child_context(ctx);
                let pre_children = prior.children(&child_ctx);
                let post_children = node.children(&child_ctx);
                actions.extend(diff_level(
                    &pre_children,
                    &post_children,
                    &child_ctx,
                    depth + 1,
                )?);
            }
        }
    }

    for (&node, consumed) in pre.iter().zip(&consumed) {
        if !consumed {
            debug!(kind = node.kind(), "drop");
            actions.extend(node.drop_actions(ctx)?);
            // No recursion: removal cascades to contained children.
        }
    }

    Ok(actions)
}

/// Strict up-front validation: at most one match may exist per node, so two
/// nodes sharing an identity within one list is a caller error.
fn reject_duplicates(nodes: &[&dyn Diffable], side: &'static str) -> Result<()> {
    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            if a.is_equal(b) {
                return Err(Error::DuplicateIdentity {
                    side,
                    kind: a.kind(),
                });
            }
        }
    }
    Ok(())
}
