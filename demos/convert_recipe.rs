//! # Recipe Conversion Example
//!
//! Converts a small recipe to the metric system, then doubles it.
//!
//! Run with `RUST_LOG=recipe_units=debug cargo run --example convert_recipe`
//! to follow each conversion, and set `RECIPE_UNITS_CONFIG` (or put it in a
//! `.env` file) to point at a JSON configuration.

use anyhow::Result;
use recipe_units::text_processing::find_measurements;
use recipe_units::{Converter, ConverterConfig, RecipeText, System};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting recipe conversion example");

    let converter = Converter::new(ConverterConfig::from_env())?;

    let recipe = RecipeText {
        description: "Chewy cookies. Bake at 350°F until golden.".to_string(),
        ingredients: vec![
            "2 ¼ cups all-purpose flour".to_string(),
            "1 teaspoon baking soda".to_string(),
            "1 cup butter, softened".to_string(),
            "¾ cup granulated sugar".to_string(),
            "2 large eggs".to_string(),
            "2 cups chocolate chips".to_string(),
        ],
        instructions: vec![
            "Preheat the oven to 375°F. Line a baking sheet.".to_string(),
            "Drop 1-1/2 tablespoons of dough per cookie, 2” apart.".to_string(),
        ],
    };

    println!("🔍 Measurements found in the ingredients:");
    for m in find_measurements(&recipe.ingredients.join("\n")) {
        println!("  • line {}: '{}' ({:?})", m.line_number + 1, m.text, m.unit);
    }

    let metric = converter.convert_recipe(&recipe, System::Metric)?;
    println!("\n📏 Metric version:");
    println!("{}", metric.description);
    for line in &metric.ingredients {
        println!("  - {line}");
    }
    for step in &metric.instructions {
        println!("  > {step}");
    }

    let doubled = converter.scale_recipe(&recipe, 24.0, 48.0);
    println!("\n✖️ Doubled (24 -> 48 cookies):");
    for line in &doubled.ingredients {
        println!("  - {line}");
    }

    println!("\n{}", serde_json::to_string_pretty(&metric)?);
    Ok(())
}
