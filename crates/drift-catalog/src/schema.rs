use std::any::Any;

use drift::{Action, Context, Diffable, Result};

use crate::ddl::{CreateSchema, DropSchema, RenameSchema};
use crate::{Class, EnumType, KEY_SCHEMA, expect_kind};

/// A database schema (namespace).
///
/// Children are the enum types followed by the tables: a type must exist
/// before any table whose columns use it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDef {
    /// Catalog identifier
    pub oid: String,
    /// Schema name
    pub name: String,
    /// User-defined enum types
    pub types: Vec<EnumType>,
    /// Ordinary tables
    pub classes: Vec<Class>,
}

impl SchemaDef {
    pub fn new(oid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            types: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn with_types(mut self, types: Vec<EnumType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_classes(mut self, classes: Vec<Class>) -> Self {
        self.classes = classes;
        self
    }
}

impl Diffable for SchemaDef {
    fn kind(&self) -> &'static str {
        "schema"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let Some(prior) = prior else {
            // Self-contained create: every child's own create follows the
            // CREATE SCHEMA within this return, under the extended context,
            // since the engine will not recurse into a created node.
            let mut actions: Vec<Box<dyn Action>> = vec![Box::new(CreateSchema {
                name: self.name.clone(),
            })];
            let child_ctx = self.child_context(ctx);
            for child in self.children(&child_ctx) {
                actions.extend(child.diff(None, &child_ctx)?);
            }
            return Ok(actions);
        };
        let prior = expect_kind::<SchemaDef>(prior, self.kind())?;

        if prior.name != self.name {
            Ok(vec![Box::new(RenameSchema {
                from: prior.name.clone(),
                to: self.name.clone(),
            })])
        } else {
            Ok(Vec::new())
        }
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        let mut children: Vec<&dyn Diffable> =
            Vec::with_capacity(self.types.len() + self.classes.len());
        children.extend(self.types.iter().map(|t| t as &dyn Diffable));
        children.extend(self.classes.iter().map(|c| c as &dyn Diffable));
        children
    }

    fn drop_actions(&self, _ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        Ok(vec![Box::new(DropSchema {
            name: self.name.clone(),
        })])
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<SchemaDef>()
            .is_some_and(|o| o.oid == self.oid)
    }

    fn child_context(&self, ctx: &Context) -> Context {
        ctx.with(KEY_SCHEMA, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attribute;

    fn sql(actions: &[Box<dyn Action>]) -> Vec<String> {
        actions.iter().map(|a| a.to_sql()).collect()
    }

    #[test]
    fn test_types_precede_tables_in_children() {
        let schema = SchemaDef::new("2200", "public")
            .with_types(vec![EnumType::new("16500", "status", vec![])])
            .with_classes(vec![Class::new("16400", "account")]);

        let kinds: Vec<&str> = schema
            .children(&Context::new())
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(kinds, ["enum type", "table"]);
    }

    #[test]
    fn test_create_is_self_contained() {
        let schema = SchemaDef::new("16399", "app")
            .with_types(vec![EnumType::new(
                "16500",
                "status",
                vec![crate::EnumValue::new("16501", "active")],
            )])
            .with_classes(vec![
                Class::new("16400", "account")
                    .with_attributes(vec![Attribute::new(1, "id", "bigint").not_null()]),
            ]);

        let actions = schema.diff(None, &Context::new()).unwrap();
        assert_eq!(
            sql(&actions),
            [
                "CREATE SCHEMA \"app\";",
                "CREATE TYPE \"app\".\"status\" AS ENUM ('active');",
                "CREATE TABLE \"app\".\"account\" (\n    \"id\" bigint NOT NULL\n);",
            ]
        );
    }

    #[test]
    fn test_rename() {
        let before = SchemaDef::new("16399", "app");
        let after = SchemaDef::new("16399", "core");

        let actions = after.diff(Some(&before), &Context::new()).unwrap();
        assert_eq!(sql(&actions), ["ALTER SCHEMA \"app\" RENAME TO \"core\";"]);
    }

    #[test]
    fn test_drop_cascades() {
        let schema = SchemaDef::new("16399", "app")
            .with_classes(vec![Class::new("16400", "account")]);

        let actions = schema.drop_actions(&Context::new()).unwrap();
        assert_eq!(sql(&actions), ["DROP SCHEMA \"app\" CASCADE;"]);
    }
}
