#[cfg(test)]
mod tests {
    use recipe_units::conversion_errors::ConversionError;
    use recipe_units::fractions::{replace_decimal_fractions, replace_vulgar_fractions};
    use recipe_units::measurement_types::System;
    use recipe_units::sentence_tokenizer::{SentenceTokenizer, UnicodeSentenceTokenizer};
    use recipe_units::text_processing::{
        convert_paragraph, convert_sentence, detect_system, find_measurements,
    };

    const SYSTEMS: [System; 3] = [System::Imperial, System::Metric, System::Invalid];

    #[test]
    fn test_same_system_always_fails() {
        let sentences = ["", "1 cup butter", "Whisk the eggs.", "200 g flour"];

        for sentence in sentences {
            for system in SYSTEMS {
                assert_eq!(
                    convert_sentence(sentence, system, system),
                    Err(ConversionError::UnchangedSystem { system }),
                    "sentence '{sentence}' in {system}"
                );
            }
        }
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        let cases = vec![
            ("Melt 1 cup butter in a pan.", "Melt ", " butter in a pan."),
            ("(about 2 pounds), trimmed", "(about ", "), trimmed"),
            ("Café: 1 tsp sucre, voilà", "Café: ", " sucre, voilà"),
        ];

        for (input, prefix, suffix) in cases {
            let converted = convert_sentence(input, System::Imperial, System::Metric).unwrap();
            assert!(converted.starts_with(prefix), "'{converted}' lost prefix '{prefix}'");
            assert!(converted.ends_with(suffix), "'{converted}' lost suffix '{suffix}'");
        }
    }

    #[test]
    fn test_metric_to_imperial_sentences() {
        let cases = vec![
            ("Pour 500 ml stock.", "Pour 1.06 pints stock."),
            ("Add 2 l water.", "Add 2.11 fl qt water."),
            ("Bake at 180°C for 20 minutes.", "Bake at 356 °F for 20 minutes."),
            ("Roll to 5 mm thick.", "Roll to 0.2 inch thick."),
            ("Use 1 kg flour.", "Use 2.2 lb flour."),
        ];

        for (input, expected) in cases {
            assert_eq!(
                convert_sentence(input, System::Metric, System::Imperial).as_deref(),
                Ok(expected),
                "input '{input}'"
            );
        }
    }

    #[test]
    fn test_irregular_quantities() {
        let cases = vec![
            ("1 1/2 cups flour", "3.55 dl flour"),
            ("2-3 tablespoons oil", "29.57-44.36 ml oil"),
            ("1-1/2 cups flour", "3.55 dl flour"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                convert_sentence(input, System::Imperial, System::Metric).as_deref(),
                Ok(expected),
                "input '{input}'"
            );
        }
    }

    #[test]
    fn test_unparseable_quantity() {
        assert_eq!(
            convert_sentence("1/0 cup sugar", System::Imperial, System::Metric),
            Err(ConversionError::UnparseableQuantity {
                quantity: "1/0".to_string()
            })
        );
    }

    #[test]
    fn test_paragraph_keeps_sentence_count() {
        let tokenizer = UnicodeSentenceTokenizer;
        let paragraphs = vec![
            "",
            "Nothing to convert here.",
            "Melt 1 cup butter. Add 2 eggs. Bake at 350°F for 30 minutes.",
            "Mix 1/0 cup of water. Then add 1 tsp salt.",
        ];

        for paragraph in paragraphs {
            let converted = convert_paragraph(&tokenizer, paragraph, System::Imperial, System::Metric);
            assert_eq!(
                tokenizer.tokenize(&converted).len(),
                tokenizer.tokenize(paragraph).len(),
                "paragraph '{paragraph}' became '{converted}'"
            );
        }
    }

    #[test]
    fn test_paragraph_mixes_converted_and_verbatim_sentences() {
        let converted = convert_paragraph(
            &UnicodeSentenceTokenizer,
            "Mix 1/0 cup of water. Then add 1 tsp salt.",
            System::Imperial,
            System::Metric,
        );
        assert_eq!(converted, "Mix 1/0 cup of water. Then add 4.93 ml salt.");
    }

    #[test]
    fn test_vulgar_fractions() {
        let replaced = replace_vulgar_fractions("1½ cups");
        assert!(replaced.contains("1 1/2"), "got '{replaced}'");
        assert!(!replaced.contains('½'));

        assert_eq!(replace_vulgar_fractions("⅓ cup and ¾ tsp"), "1/3 cup and 3/4 tsp");
    }

    #[test]
    fn test_decimal_fractions() {
        assert_eq!(replace_decimal_fractions("0.25 cup"), "1/4 cup");
        assert_eq!(replace_decimal_fractions("2.75 cups"), "2 3/4 cups");
        assert_eq!(replace_decimal_fractions("2.37 dl"), "2.37 dl");
    }

    #[test]
    fn test_detect_system_is_exclusive() {
        let lines = vec![
            "2 cups flour",
            "1 tbsp sugar",
            "3 lbs potatoes",
            "500 g butter",
            "250 ml milk",
            "1 kg tomatoes",
        ];

        for line in lines {
            let system = detect_system(line);
            assert_ne!(system, System::Invalid, "line '{line}'");
        }
    }

    #[test]
    fn test_find_measurements_across_lines() {
        let text = "2 cups flour\n1 tablespoon sugar\nsome salt\n3 eggs\n250 ml milk";

        let matches = find_measurements(text);
        let found: Vec<(usize, &str)> = matches
            .iter()
            .map(|m| (m.line_number, m.text.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![(0, "2 cups"), (1, "1 tablespoon"), (4, "250 ml")]
        );
    }
}
