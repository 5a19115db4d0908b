//! # Integration Tests
//!
//! End-to-end tests converting and scaling whole recipes through the
//! [`Converter`] context object.

use recipe_units::{
    detect_system, normalize_quantities, ConversionError, Converter, ConverterConfig, RecipeText,
    System,
};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pancakes() -> RecipeText {
    RecipeText {
        description: "Fluffy pancakes for 4 people. Ready in 20 minutes.".to_string(),
        ingredients: vec![
            "1 ½ cups all-purpose flour".to_string(),
            "3 ½ teaspoons baking powder".to_string(),
            "1 tablespoon white sugar".to_string(),
            "1 ¼ cups milk".to_string(),
            "1 egg".to_string(),
            "3 tablespoons butter, melted".to_string(),
        ],
        instructions: vec![
            "Sift the flour and baking powder together. Make a well in the center.".to_string(),
            "Heat a lightly oiled griddle. Pour about 1/4 cup of batter per pancake.".to_string(),
        ],
    }
}

#[test]
fn test_convert_recipe_to_metric() {
    init_tracing();
    let converter = Converter::default();

    let metric = converter.convert_recipe(&pancakes(), System::Metric).unwrap();

    assert_eq!(
        metric.ingredients,
        vec![
            "3.55 dl all-purpose flour",
            "17.25 ml baking powder",
            "14.79 ml white sugar",
            "2.96 dl milk",
            "1 egg",
            "44.36 ml butter, melted",
        ]
    );
    assert_eq!(metric.description, pancakes().description);
    assert_eq!(
        metric.instructions[1],
        "Heat a lightly oiled griddle. Pour about 59.15 ml of batter per pancake."
    );

    // Every converted ingredient now reads as metric
    for line in metric.ingredients.iter().filter(|l| *l != "1 egg") {
        assert_eq!(detect_system(line), System::Metric, "line '{line}'");
    }
}

#[test]
fn test_converted_recipe_cannot_be_converted_again() {
    let converter = Converter::default();
    let metric = converter.convert_recipe(&pancakes(), System::Metric).unwrap();

    assert_eq!(
        converter.convert_recipe(&metric, System::Metric),
        Err(ConversionError::UnchangedSystem {
            system: System::Metric
        })
    );
}

#[test]
fn test_scale_recipe_yield() {
    init_tracing();
    let converter = Converter::default();

    let doubled = converter.scale_recipe(&pancakes(), 4.0, 8.0);

    assert_eq!(
        doubled.ingredients,
        vec![
            "3 cups all-purpose flour",
            "2 1/3 tbsp baking powder",
            "2 tbsp white sugar",
            "2 1/2 cups milk",
            "2 egg",
            "6 tbsp butter, melted",
        ]
    );
    assert_eq!(doubled.instructions, pancakes().instructions);
}

#[test]
fn test_scale_large_recipe_in_parallel() {
    let config = ConverterConfig {
        parallel_threshold: 4,
        ..Default::default()
    };
    let converter = Converter::new(config).unwrap();

    let sequential = Converter::default().scale_ingredients(&pancakes().ingredients, 3.0);
    let parallel = converter.scale_ingredients(&pancakes().ingredients, 3.0);

    assert_eq!(parallel, sequential);
}

#[test]
fn test_converter_is_shared_across_threads() {
    let converter = Arc::new(Converter::default());

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || {
                converter.convert_sentence(&format!("{n} cups water"), System::Imperial, System::Metric)
            })
        })
        .collect();

    for handle in handles {
        let converted = handle.join().unwrap().unwrap();
        assert!(converted.ends_with(" water"), "got '{converted}'");
    }
}

#[test]
fn test_normalize_quantities_after_conversion() {
    let converter = Converter::default();
    let converted = converter
        .convert_sentence("Add 1 tsp vanilla", System::Imperial, System::Metric)
        .unwrap();

    assert_eq!(converted, "Add 4.93 ml vanilla");
    assert_eq!(normalize_quantities(&converted), "Add 4.93 mL vanilla");
}
