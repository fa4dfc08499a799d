use std::any::Any;

use drift::{Action, Context, Diffable, Result};

use crate::ddl::{CreateTable, DropTable, RenameTable};
use crate::{Attribute, Index, KEY_SCHEMA, KEY_TABLE, expect_kind};

/// An ordinary table.
///
/// Children are the columns followed by the indexes, so at any level a
/// column change is emitted before an index change on the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Catalog identifier
    pub oid: String,
    /// Relation name
    pub name: String,
    /// Columns, in attribute-number order
    pub attributes: Vec<Attribute>,
    /// Indexes
    pub indexes: Vec<Index>,
}

impl Class {
    pub fn new(oid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            attributes: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<Index>) -> Self {
        self.indexes = indexes;
        self
    }
}

impl Diffable for Class {
    fn kind(&self) -> &'static str {
        "table"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let schema = ctx.require(KEY_SCHEMA)?.to_string();

        let Some(prior) = prior else {
            // Self-contained create: the column list is embedded in the
            // CREATE TABLE, and the indexes follow it within this same
            // return — the engine will not visit the children of a created
            // node.
            let mut actions: Vec<Box<dyn Action>> = vec![Box::new(CreateTable {
                schema,
                name: self.name.clone(),
                columns: self.attributes.clone(),
            })];
            let child_ctx = self.child_context(ctx);
            for index in &self.indexes {
                actions.extend(index.diff(None, &child_ctx)?);
            }
            return Ok(actions);
        };
        let prior = expect_kind::<Class>(prior, self.kind())?;

        if prior.name != self.name {
            Ok(vec![Box::new(RenameTable {
                schema,
                from: prior.name.clone(),
                to: self.name.clone(),
            })])
        } else {
            Ok(Vec::new())
        }
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        let mut children: Vec<&dyn Diffable> =
            Vec::with_capacity(self.attributes.len() + self.indexes.len());
        children.extend(self.attributes.iter().map(|a| a as &dyn Diffable));
        children.extend(self.indexes.iter().map(|i| i as &dyn Diffable));
        children
    }

    fn drop_actions(&self, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        // Columns and indexes go with the table; no child drops needed.
        Ok(vec![Box::new(DropTable {
            schema: ctx.require(KEY_SCHEMA)?.to_string(),
            name: self.name.clone(),
        })])
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<Class>()
            .is_some_and(|o| o.oid == self.oid)
    }

    fn child_context(&self, ctx: &Context) -> Context {
        ctx.with(KEY_TABLE, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new().with(KEY_SCHEMA, "public")
    }

    fn sql(actions: &[Box<dyn Action>]) -> Vec<String> {
        actions.iter().map(|a| a.to_sql()).collect()
    }

    #[test]
    fn test_create_embeds_columns_and_appends_indexes() {
        let table = Class::new("16400", "account")
            .with_attributes(vec![
                Attribute::new(1, "id", "bigint").not_null(),
                Attribute::new(2, "email", "text").not_null(),
            ])
            .with_indexes(vec![Index::new(
                "16401",
                "account_email_idx",
                "CREATE UNIQUE INDEX \"account_email_idx\" ON \"public\".\"account\" (\"email\")",
            )]);

        let actions = table.diff(None, &ctx()).unwrap();
        assert_eq!(
            sql(&actions),
            [
                "CREATE TABLE \"public\".\"account\" (\n    \"id\" bigint NOT NULL,\n    \"email\" text NOT NULL\n);",
                "CREATE UNIQUE INDEX \"account_email_idx\" ON \"public\".\"account\" (\"email\");",
            ]
        );
    }

    #[test]
    fn test_rename_keeps_identity() {
        let before = Class::new("16400", "accounts");
        let after = Class::new("16400", "account");

        assert!(after.is_equal(&before));
        let actions = after.diff(Some(&before), &ctx()).unwrap();
        assert_eq!(
            sql(&actions),
            ["ALTER TABLE \"public\".\"accounts\" RENAME TO \"account\";"]
        );
    }

    #[test]
    fn test_different_oid_is_a_different_table() {
        let a = Class::new("16400", "account");
        let b = Class::new("16444", "account");
        assert!(!a.is_equal(&b));
    }

    #[test]
    fn test_children_order_columns_before_indexes() {
        let table = Class::new("16400", "account")
            .with_attributes(vec![Attribute::new(1, "id", "bigint")])
            .with_indexes(vec![Index::new("16401", "account_pkey", "CREATE ...")]);

        let kinds: Vec<&str> = table
            .children(&ctx())
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(kinds, ["column", "index"]);
    }
}
