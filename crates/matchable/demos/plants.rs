//! Plot styling for a small garden.
//!
//! Each plant gets a style dict assembled from its type and attributes.
//! Run with `RUST_LOG=matchable=trace` to watch patterns being applied.

use matchable::{ObjectValue, Pattern, Spec, TypeDef, TypeRegistry, Value};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut types = TypeRegistry::new();
    let plant = types.define(TypeDef::new("Plant"))?;
    let flower = types.define(TypeDef::new("Flower").base(plant))?;
    let tree = types.define(TypeDef::new("Tree").base(plant))?;

    let style = Spec::builder(&types)
        .bind(
            plant,
            Value::dict([
                ("linestyle", Value::from("-")),
                ("linewidth", Value::int(2)),
                ("facecolor", Value::from("none")),
            ]),
        )
        .bind(flower, Value::dict([("edgecolor", "orange")]))
        .bind(
            Pattern::for_type(flower).attr("height").lt(2.0)?,
            Value::dict([("hatch", "/")]),
        )
        .bind(
            Pattern::for_type(flower).attr("n_petals").ge(7)?,
            Value::dict([("facecolor", "#ff7f0e33")]),
        )
        .bind(tree, Value::dict([("edgecolor", "green")]))
        .bind(
            Pattern::for_type(tree).attr("height").gt(160)?,
            Value::dict([("linestyle", "--")]),
        )
        .build()?;

    let flower_of = |height: f64, petals: i64| {
        Value::object(
            ObjectValue::new(flower)
                .with_attr("height", height)
                .with_attr("n_petals", petals),
        )
    };
    let tree_of = |height: f64| Value::object(ObjectValue::new(tree).with_attr("height", height));

    let garden = [
        flower_of(4.0, 5),
        flower_of(3.5, 7),
        flower_of(6.8, 4),
        tree_of(104.6),
        flower_of(1.8, 9),
        tree_of(187.2),
        tree_of(121.9),
        flower_of(2.2, 5),
    ];

    for (i, specimen) in garden.iter().enumerate() {
        let matched = style.match_value(&types, specimen)?;
        println!("{i}: {specimen:?}\n   {matched}");
    }
    Ok(())
}
