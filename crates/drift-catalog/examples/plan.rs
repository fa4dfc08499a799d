//! Print the DDL plan between two in-memory catalog snapshots.
//!
//! Run with `RUST_LOG=debug` to watch the engine's per-level decisions:
//!
//! ```text
//! cargo run --example plan
//! ```

use drift_catalog::{Attribute, Class, EnumType, EnumValue, SchemaDef, reconcile};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let before = vec![SchemaDef::new("2200", "public").with_classes(vec![
        Class::new("16400", "users").with_attributes(vec![
            Attribute::new(1, "id", "bigint").not_null(),
            Attribute::new(2, "name", "text"),
        ]),
    ])];

    let after = vec![
        SchemaDef::new("2200", "public")
            .with_types(vec![EnumType::new(
                "16500",
                "user_state",
                vec![
                    EnumValue::new("16501", "active"),
                    EnumValue::new("16502", "banned"),
                ],
            )])
            .with_classes(vec![Class::new("16400", "user").with_attributes(vec![
                Attribute::new(1, "id", "bigint").not_null(),
                Attribute::new(2, "name", "text").not_null(),
                Attribute::new(3, "state", "user_state")
                    .not_null()
                    .with_default("'active'"),
            ])]),
    ];

    match reconcile(&before, &after) {
        Ok(actions) => print!("{}", drift::render_sql(&actions)),
        Err(err) => {
            eprintln!("reconciliation aborted: {err}");
            std::process::exit(1);
        }
    }
}
