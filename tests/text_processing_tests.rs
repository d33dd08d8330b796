#[cfg(test)]
mod tests {
    use cooklang_parser::preprocessor::preprocess;
    use cooklang_parser::quantity_parser::parse_quantity;
    use cooklang_parser::text_processing::StepProcessor;
    use cooklang_parser::{Amount, BlockCommentScope, Location, ParseError, ParserConfig, Quantity};

    fn create_processor() -> StepProcessor {
        StepProcessor::new()
    }

    #[test]
    fn test_preprocess_then_process() {
        let processor = create_processor();
        let lines = preprocess(
            ">> serves: 4\nChop the @onion{1} -- finely\n\nFry it in the #pan",
            BlockCommentScope::Line,
        );

        assert_eq!(lines.metadata_lines, vec![">> serves: 4"]);
        let steps = processor.process_steps(&lines.step_lines).unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].rendered, "Chop the onion");
        assert_eq!(steps[0].ingredients[0].location, Location::new(0, 9, 14));
        assert_eq!(steps[1].rendered, "Fry it in the pan");
        assert_eq!(steps[1].cookware, vec!["pan"]);
    }

    #[test]
    fn test_all_families_in_one_line() {
        let processor = create_processor();
        let step = processor
            .process_step(0, "Simmer @tomato sauce{2%cups} in a #sauce pan{} for ~simmer{1.5%hours}")
            .unwrap();

        assert_eq!(step.rendered, "Simmer tomato sauce in a sauce pan for 1.5 hours");
        assert_eq!(step.ingredients[0].name, "tomato sauce");
        assert_eq!(step.ingredients[0].location, Location::new(0, 7, 19));
        assert_eq!(step.cookware, vec!["sauce pan"]);
        assert_eq!(step.timers[0].name, "simmer");
        assert_eq!(
            step.timers[0].quantity,
            Some(Quantity::new(Amount::Decimal(1.5), Some("hours")))
        );
    }

    #[test]
    fn test_spans_follow_timer_text() {
        let processor = create_processor();
        let step = processor
            .process_step(2, "Wait ~{1/2%hour} then add @basil")
            .unwrap();

        assert_eq!(step.rendered, "Wait 1/2 hour then add basil");
        assert_eq!(step.ingredients[0].location, Location::new(2, 23, 28));
    }

    #[test]
    fn test_empty_timer_leaves_no_markup() {
        let processor = create_processor();
        let step = processor.process_step(0, "~{} Stir @milk").unwrap();

        assert_eq!(step.rendered, " Stir milk");
        assert_eq!(step.ingredients[0].location, Location::new(0, 6, 10));
        assert_eq!(step.timers.len(), 1);
        assert_eq!(step.timers[0].quantity, None);
    }

    #[test]
    fn test_unclosed_brace_falls_back_to_word() {
        let processor = create_processor();
        let step = processor.process_step(0, "Add @salt{2%g and stir").unwrap();

        assert_eq!(step.rendered, "Add salt{2%g and stir");
        assert_eq!(step.ingredients[0].name, "salt");
        assert_eq!(step.ingredients[0].quantity, None);
    }

    #[test]
    fn test_spaced_quantities_are_opt_in() {
        let result = create_processor().process_step(0, "Bake ~{25 minutes}");
        assert!(matches!(result, Err(ParseError::MalformedQuantity { .. })));

        let processor = StepProcessor::with_config(ParserConfig::default().with_spaced_units(true));
        let step = processor.process_step(0, "Bake ~{25 minutes}").unwrap();
        assert_eq!(step.rendered, "Bake 25 minutes");
    }

    #[test]
    fn test_quantity_parser_public_api() {
        assert_eq!(
            parse_quantity("3/6%cup", true).unwrap(),
            Some(Quantity::new(Amount::rational(1, 2).unwrap(), Some("cup")))
        );
        assert_eq!(parse_quantity("", true).unwrap(), None);
    }
}
