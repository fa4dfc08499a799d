//! Concrete DDL actions.
//!
//! One struct per statement shape. Every action is constructed with its
//! ancestry (schema, table, type names) already resolved, so
//! [`to_sql`](Action::to_sql) renders from the action alone.

use drift::Action;
use drift_sql::{Ident, Lit, qualified};

use crate::Attribute;

/// Render one column definition fragment (`"name" type [NOT NULL] [DEFAULT …]`).
pub(crate) fn column_def(col: &Attribute) -> String {
    let mut def = format!("{} {}", Ident(&col.name), col.type_name);
    if col.not_null {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &col.default {
        def.push_str(&format!(" DEFAULT {}", default));
    }
    def
}

#[derive(Debug)]
pub struct CreateSchema {
    pub name: String,
}

impl Action for CreateSchema {
    fn to_sql(&self) -> String {
        format!("CREATE SCHEMA {};", Ident(&self.name))
    }
}

#[derive(Debug)]
pub struct RenameSchema {
    pub from: String,
    pub to: String,
}

impl Action for RenameSchema {
    fn to_sql(&self) -> String {
        format!("ALTER SCHEMA {} RENAME TO {};", Ident(&self.from), Ident(&self.to))
    }
}

/// Schema removal cascades: contained tables and types go with it.
#[derive(Debug)]
pub struct DropSchema {
    pub name: String,
}

impl Action for DropSchema {
    fn to_sql(&self) -> String {
        format!("DROP SCHEMA {} CASCADE;", Ident(&self.name))
    }
}

/// Self-contained table creation: the full column list is embedded.
#[derive(Debug)]
pub struct CreateTable {
    pub schema: String,
    pub name: String,
    pub columns: Vec<Attribute>,
}

impl Action for CreateTable {
    fn to_sql(&self) -> String {
        let name = qualified(&self.schema, &self.name);
        if self.columns.is_empty() {
            return format!("CREATE TABLE {} ();", name);
        }
        let parts: Vec<String> = self
            .columns
            .iter()
            .map(|col| format!("    {}", column_def(col)))
            .collect();
        format!("CREATE TABLE {} (\n{}\n);", name, parts.join(",\n"))
    }
}

#[derive(Debug)]
pub struct RenameTable {
    pub schema: String,
    pub from: String,
    pub to: String,
}

impl Action for RenameTable {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {};",
            qualified(&self.schema, &self.from),
            Ident(&self.to)
        )
    }
}

#[derive(Debug)]
pub struct DropTable {
    pub schema: String,
    pub name: String,
}

impl Action for DropTable {
    fn to_sql(&self) -> String {
        format!("DROP TABLE {};", qualified(&self.schema, &self.name))
    }
}

#[derive(Debug)]
pub struct AddColumn {
    pub schema: String,
    pub table: String,
    pub column: Attribute,
}

impl Action for AddColumn {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {};",
            qualified(&self.schema, &self.table),
            column_def(&self.column)
        )
    }
}

#[derive(Debug)]
pub struct RenameColumn {
    pub schema: String,
    pub table: String,
    pub from: String,
    pub to: String,
}

impl Action for RenameColumn {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {};",
            qualified(&self.schema, &self.table),
            Ident(&self.from),
            Ident(&self.to)
        )
    }
}

/// Retype with an explicit cast of the existing values.
#[derive(Debug)]
pub struct AlterColumnType {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub to: String,
}

impl Action for AlterColumnType {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {} USING {}::{};",
            qualified(&self.schema, &self.table),
            Ident(&self.column),
            self.to,
            Ident(&self.column),
            self.to
        )
    }
}

#[derive(Debug)]
pub struct AlterColumnNullable {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub not_null: bool,
}

impl Action for AlterColumnNullable {
    fn to_sql(&self) -> String {
        let clause = if self.not_null {
            "SET NOT NULL"
        } else {
            "DROP NOT NULL"
        };
        format!(
            "ALTER TABLE {} ALTER COLUMN {} {};",
            qualified(&self.schema, &self.table),
            Ident(&self.column),
            clause
        )
    }
}

#[derive(Debug)]
pub struct AlterColumnDefault {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub default: Option<String>,
}

impl Action for AlterColumnDefault {
    fn to_sql(&self) -> String {
        let clause = match &self.default {
            Some(expr) => format!("SET DEFAULT {}", expr),
            None => "DROP DEFAULT".to_string(),
        };
        format!(
            "ALTER TABLE {} ALTER COLUMN {} {};",
            qualified(&self.schema, &self.table),
            Ident(&self.column),
            clause
        )
    }
}

#[derive(Debug)]
pub struct DropColumn {
    pub schema: String,
    pub table: String,
    pub name: String,
}

impl Action for DropColumn {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {};",
            qualified(&self.schema, &self.table),
            Ident(&self.name)
        )
    }
}

/// Index creation replays the stored definition verbatim.
#[derive(Debug)]
pub struct CreateIndex {
    pub def: String,
}

impl Action for CreateIndex {
    fn to_sql(&self) -> String {
        format!("{};", self.def)
    }
}

#[derive(Debug)]
pub struct RenameIndex {
    pub schema: String,
    pub from: String,
    pub to: String,
}

impl Action for RenameIndex {
    fn to_sql(&self) -> String {
        format!(
            "ALTER INDEX {} RENAME TO {};",
            qualified(&self.schema, &self.from),
            Ident(&self.to)
        )
    }
}

#[derive(Debug)]
pub struct DropIndex {
    pub schema: String,
    pub name: String,
}

impl Action for DropIndex {
    fn to_sql(&self) -> String {
        format!("DROP INDEX {};", qualified(&self.schema, &self.name))
    }
}

/// Self-contained enum creation: all labels are embedded.
#[derive(Debug)]
pub struct CreateEnumType {
    pub schema: String,
    pub name: String,
    pub labels: Vec<String>,
}

impl Action for CreateEnumType {
    fn to_sql(&self) -> String {
        let labels: Vec<String> = self.labels.iter().map(|l| Lit(l).to_string()).collect();
        format!(
            "CREATE TYPE {} AS ENUM ({});",
            qualified(&self.schema, &self.name),
            labels.join(", ")
        )
    }
}

#[derive(Debug)]
pub struct RenameEnumType {
    pub schema: String,
    pub from: String,
    pub to: String,
}

impl Action for RenameEnumType {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TYPE {} RENAME TO {};",
            qualified(&self.schema, &self.from),
            Ident(&self.to)
        )
    }
}

#[derive(Debug)]
pub struct DropEnumType {
    pub schema: String,
    pub name: String,
}

impl Action for DropEnumType {
    fn to_sql(&self) -> String {
        format!("DROP TYPE {};", qualified(&self.schema, &self.name))
    }
}

#[derive(Debug)]
pub struct AddEnumValue {
    pub schema: String,
    pub type_name: String,
    pub label: String,
}

impl Action for AddEnumValue {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TYPE {} ADD VALUE {};",
            qualified(&self.schema, &self.type_name),
            Lit(&self.label)
        )
    }
}

#[derive(Debug)]
pub struct RenameEnumValue {
    pub schema: String,
    pub type_name: String,
    pub from: String,
    pub to: String,
}

impl Action for RenameEnumValue {
    fn to_sql(&self) -> String {
        format!(
            "ALTER TYPE {} RENAME VALUE {} TO {};",
            qualified(&self.schema, &self.type_name),
            Lit(&self.from),
            Lit(&self.to)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        let action = CreateTable {
            schema: "public".to_string(),
            name: "account".to_string(),
            columns: vec![
                Attribute::new(1, "id", "bigint").not_null(),
                Attribute::new(2, "email", "text"),
            ],
        };
        assert_eq!(
            action.to_sql(),
            "CREATE TABLE \"public\".\"account\" (\n    \"id\" bigint NOT NULL,\n    \"email\" text\n);"
        );
    }

    #[test]
    fn test_create_table_sql_without_columns() {
        let action = CreateTable {
            schema: "public".to_string(),
            name: "marker".to_string(),
            columns: Vec::new(),
        };
        assert_eq!(action.to_sql(), "CREATE TABLE \"public\".\"marker\" ();");
    }

    #[test]
    fn test_add_column_sql_with_default() {
        let action = AddColumn {
            schema: "public".to_string(),
            table: "account".to_string(),
            column: Attribute::new(3, "created_at", "timestamptz")
                .not_null()
                .with_default("now()"),
        };
        assert_eq!(
            action.to_sql(),
            "ALTER TABLE \"public\".\"account\" ADD COLUMN \"created_at\" timestamptz NOT NULL DEFAULT now();"
        );
    }

    #[test]
    fn test_alter_column_type_uses_cast() {
        let action = AlterColumnType {
            schema: "public".to_string(),
            table: "account".to_string(),
            column: "id".to_string(),
            to: "bigint".to_string(),
        };
        assert_eq!(
            action.to_sql(),
            "ALTER TABLE \"public\".\"account\" ALTER COLUMN \"id\" TYPE bigint USING \"id\"::bigint;"
        );
    }

    #[test]
    fn test_enum_sql_quotes_labels() {
        let action = CreateEnumType {
            schema: "public".to_string(),
            name: "status".to_string(),
            labels: vec!["active".to_string(), "it's odd".to_string()],
        };
        assert_eq!(
            action.to_sql(),
            "CREATE TYPE \"public\".\"status\" AS ENUM ('active', 'it''s odd');"
        );
    }
}
