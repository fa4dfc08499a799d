use std::any::Any;

use drift::{Action, Context, Diffable, Result};

use crate::ddl::{CreateIndex, DropIndex, RenameIndex};
use crate::{KEY_SCHEMA, expect_kind};

/// A table index.
///
/// The definition is the complete `CREATE INDEX` statement as the catalog
/// reports it. There is no way to alter an index definition in place, so a
/// changed definition becomes a drop followed by a recreate; only a pure
/// name change renames in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// Catalog identifier
    pub oid: String,
    /// Index name
    pub name: String,
    /// Full `CREATE INDEX` statement, without trailing semicolon
    pub def: String,
}

impl Index {
    pub fn new(oid: impl Into<String>, name: impl Into<String>, def: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            def: def.into(),
        }
    }
}

impl Diffable for Index {
    fn kind(&self) -> &'static str {
        "index"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn diff(&self, prior: Option<&dyn Diffable>, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        let Some(prior) = prior else {
            return Ok(vec![Box::new(CreateIndex {
                def: self.def.clone(),
            })]);
        };
        let prior = expect_kind::<Index>(prior, self.kind())?;

        if prior.def != self.def {
            return Ok(vec![
                Box::new(DropIndex {
                    schema: ctx.require(KEY_SCHEMA)?.to_string(),
                    name: prior.name.clone(),
                }),
                Box::new(CreateIndex {
                    def: self.def.clone(),
                }),
            ]);
        }
        if prior.name != self.name {
            return Ok(vec![Box::new(RenameIndex {
                schema: ctx.require(KEY_SCHEMA)?.to_string(),
                from: prior.name.clone(),
                to: self.name.clone(),
            })]);
        }
        Ok(Vec::new())
    }

    fn children(&self, _ctx: &Context) -> Vec<&dyn Diffable> {
        Vec::new()
    }

    fn drop_actions(&self, ctx: &Context) -> Result<Vec<Box<dyn Action>>> {
        Ok(vec![Box::new(DropIndex {
            schema: ctx.require(KEY_SCHEMA)?.to_string(),
            name: self.name.clone(),
        })])
    }

    fn is_equal(&self, other: &dyn Diffable) -> bool {
        other
            .as_any()
            .downcast_ref::<Index>()
            .is_some_and(|o| o.oid == self.oid)
    }
}
