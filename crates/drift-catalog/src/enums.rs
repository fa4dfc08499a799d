use std::any::Any;

use drift::{Action, Context, Diffable, Result};

use crate::ddl::{
    AddEnumValue, CreateEnumType, DropEnumType, RenameEnumType, RenameEnumValue,
};
use crate::{KEY_SCHEMA, KEY_TYPE, expect_kind};

/// A user-defined enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// Catalog identifier
    pub oid: String,
    /// Type name
    pub name: String,
    /// Labels, in declaration order
    pub values: Vec<EnumValue>,
}

impl EnumType {
    pub fn new(oid: impl Into<String>, name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            values,
        }
    }
}

/// One label of an enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Catalog identifier
    pub oid: String,
    /// Label text
    pub label: String,
}

impl EnumValue {
    pub fn new(oid: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            label: label.into(),
        }
    }
}

impl Diffable for EnumType {
    fn kind(&self) -> &'static str {
        "enum type"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let schema = ctx.require(KEY_SCHEMA)?.to_string();

        let Some(prior) = prior else {
            // Self-contained create: all labels travel with the type.
            return Ok(vec![Box::new(CreateEnumType {
                schema,
                name: self.name.clone(),
                labels: self.values.iter().map(|v| v.label.clone()).collect(),
            })]);
        };
        let prior = expect_kind::<EnumType>(prior, self.kind())?;

        if prior.name != self.name {
            Ok(vec![Box::new(RenameEnumType {
                schema,
                from: prior.name.clone(),
                to: self.name.clone(),
            })])
        } else {
            Ok(Vec::new())
        }
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        self.values.iter().map(|v| v as &dyn Diffable).collect()
    }

    fn drop_actions(&self, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        Ok(vec![Box::new(DropEnumType {
            schema: ctx.require(KEY_SCHEMA)?.to_string(),
            name: self.name.clone(),
        })])
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<EnumType>()
            .is_some_and(|o| o.oid == self.oid)
    }

    fn child_context(&self, ctx: &Context) -> Context {
        ctx.with(KEY_TYPE, &self.name)
    }
}

impl Diffable for EnumValue {
    fn kind(&self) -> &'static str {
        "enum value"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let schema = ctx.require(KEY_SCHEMA)?.to_string();
        let type_name = ctx.require(KEY_TYPE)?.to_string();

        let Some(prior) = prior else {
            return Ok(vec![Box::new(AddEnumValue {
                schema,
                type_name,
                label: self.label.clone(),
            })]);
        };
        let prior = expect_kind::<EnumValue>(prior, self.kind())?;

        if prior.label != self.label {
            Ok(vec![Box::new(RenameEnumValue {
                schema,
                type_name,
                from: prior.label.clone(),
                to: self.label.clone(),
            })])
        } else {
            Ok(Vec::new())
        }
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        Vec::new()
    }

    fn drop_actions(&self, _ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        // PostgreSQL cannot remove an enum label; dropping the whole type is
        // the only way out, and that is the parent's decision.
        Ok(Vec::new())
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<EnumValue>()
            .is_some_and(|o| o.oid == self.oid)
    }
}
