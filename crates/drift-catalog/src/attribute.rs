use std::any::Any;

use drift::{Action, Context, Diffable, Result};

use crate::ddl::{
    AddColumn, AlterColumnDefault, AlterColumnNullable, AlterColumnType, DropColumn, RenameColumn,
};
use crate::{KEY_SCHEMA, KEY_TABLE, expect_kind};

/// A table column.
///
/// Identity is the attribute number, which survives renames and retypes —
/// the name and type are descriptive attributes, and a changed name is a
/// rename of the same column, never a drop plus a create.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute number within the table (1-indexed, stable)
    pub num: i16,
    /// Column name
    pub name: String,
    /// Type expression (e.g. `bigint`, `character varying(32)`)
    pub type_name: String,
    /// Whether the column rejects NULL
    pub not_null: bool,
    /// Default value expression (if any)
    pub default: Option<String>,
}

impl Attribute {
    /// Create a nullable column with no default.
    pub fn new(num: i16, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            num,
            name: name.into(),
            type_name: type_name.into(),
            not_null: false,
            default: None,
        }
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the default value expression.
    pub fn with_default(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }
}

impl Diffable for Attribute {
    fn kind(&self) -> &'static str {
        "column"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let schema = ctx.require(KEY_SCHEMA)?.to_string();
        let table = ctx.require(KEY_TABLE)?.to_string();

        let Some(prior) = prior else {
            return Ok(vec![Box::new(AddColumn {
                schema,
                table,
                column: self.clone(),
            })]);
        };
        let prior = expect_kind::<Attribute>(prior, self.kind())?;

        let mut actions: Vec<Box<dyn Action>> = Vec::new();
        // The rename goes first so every later statement can reference the
        // new name.
        if prior.name != self.name {
            actions.push(Box::new(RenameColumn {
                schema: schema.clone(),
                table: table.clone(),
                from: prior.name.clone(),
                to: self.name.clone(),
            }));
        }
        if prior.type_name != self.type_name {
            actions.push(Box::new(AlterColumnType {
                schema: schema.clone(),
                table: table.clone(),
                column: self.name.clone(),
                to: self.type_name.clone(),
            }));
        }
        if prior.not_null != self.not_null {
            actions.push(Box::new(AlterColumnNullable {
                schema: schema.clone(),
                table: table.clone(),
                column: self.name.clone(),
                not_null: self.not_null,
            }));
        }
        if prior.default != self.default {
            actions.push(Box::new(AlterColumnDefault {
                schema,
                table,
                column: self.name.clone(),
                default: self.default.clone(),
            }));
        }
        Ok(actions)
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        Vec::new()
    }

    fn drop_actions(&self, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        Ok(vec![Box::new(DropColumn {
            schema: ctx.require(KEY_SCHEMA)?.to_string(),
            table: ctx.require(KEY_TABLE)?.to_string(),
            name: self.name.clone(),
        })])
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<Attribute>()
            .is_some_and(|o| o.num == self.num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new()
            .with(KEY_SCHEMA, "public")
            .with(KEY_TABLE, "account")
    }

    fn sql(actions: &[Box<dyn Action>]) -> Vec<String> {
        actions.iter().map(|a| a.to_sql()).collect()
    }

    #[test]
    fn test_identity_is_attribute_number() {
        let before = Attribute::new(2, "mail", "text");
        let after = Attribute::new(2, "email", "citext");
        let other = Attribute::new(3, "mail", "text");

        assert!(after.is_equal(&before));
        assert!(!after.is_equal(&other));
    }

    #[test]
    fn test_absent_prior_adds_column() {
        let col = Attribute::new(2, "email", "text").not_null();
        let actions = col.diff(None, &ctx()).unwrap();
        assert_eq!(
            sql(&actions),
            ["ALTER TABLE \"public\".\"account\" ADD COLUMN \"email\" text NOT NULL;"]
        );
    }

    #[test]
    fn test_rename_precedes_retype() {
        let before = Attribute::new(2, "mail", "text");
        let after = Attribute::new(2, "email", "citext");

        let actions = after.diff(Some(&before), &ctx()).unwrap();
        assert_eq!(
            sql(&actions),
            [
                "ALTER TABLE \"public\".\"account\" RENAME COLUMN \"mail\" TO \"email\";",
                "ALTER TABLE \"public\".\"account\" ALTER COLUMN \"email\" TYPE citext USING \"email\"::citext;",
            ]
        );
    }

    #[test]
    fn test_nullability_and_default_changes() {
        let before = Attribute::new(3, "created_at", "timestamptz");
        let after = Attribute::new(3, "created_at", "timestamptz")
            .not_null()
            .with_default("now()");

        let actions = after.diff(Some(&before), &ctx()).unwrap();
        assert_eq!(
            sql(&actions),
            [
                "ALTER TABLE \"public\".\"account\" ALTER COLUMN \"created_at\" SET NOT NULL;",
                "ALTER TABLE \"public\".\"account\" ALTER COLUMN \"created_at\" SET DEFAULT now();",
            ]
        );
    }

    #[test]
    fn test_unchanged_column_diffs_to_nothing() {
        let col = Attribute::new(1, "id", "bigint").not_null();
        let actions = col.diff(Some(&col.clone()), &ctx()).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_missing_table_context_is_rejected() {
        let col = Attribute::new(1, "id", "bigint");
        let err = col
            .diff(None, &Context::new().with(KEY_SCHEMA, "public"))
            .unwrap_err();
        assert!(matches!(err, drift::Error::MissingContext { key: "table" }));
    }
}
