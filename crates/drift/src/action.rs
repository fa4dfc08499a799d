use std::fmt;

/// An executable unit of schema change.
///
/// Actions are produced by [`Diffable`](crate::Diffable) implementations and
/// consumed by an external executor. An action is immutable once constructed
/// and carries everything it needs to render on its own — enclosing schema
/// and table names are resolved from the [`Context`](crate::Context) at
/// construction time, never looked up later.
///
/// Actions have no identity and are never compared to each other; their
/// position in the sequence returned by [`diff`](crate::diff) is the only
/// contract that matters. The executor must apply them in that order.
pub trait Action: fmt::Debug {
    /// Render the SQL statement(s) for this action.
    fn to_sql(&self) -> String;
}

/// Render an action sequence as a SQL script, one statement per line.
pub fn render_sql(actions: &[Box<dyn Action>]) -> String {
    let mut sql = String::new();
    for action in actions {
        sql.push_str(&action.to_sql());
        sql.push('\n');
    }
    sql
}
