#[cfg(test)]
mod test_query_language {
    use alarmnet::inference::exact_inference;
    use alarmnet::scenarios::{DEMONSTRATION_QUERIES, standard_cases};
    use alarmnet::{InferenceError, Node, format_output, parse_query};

    fn exact_output(input: &str) -> String {
        let query = parse_query(input).unwrap();
        format_output(&exact_inference(&query).unwrap())
    }

    #[test]
    fn test_single_variable_outputs() {
        assert_eq!(exact_output("[<A,t><B,f>][J]"), "[<J,0.9000>]");
        assert_eq!(exact_output("[][B]"), "[<B,0.0010>]");
        assert_eq!(exact_output("[<J,t>][A]"), "[<A,0.0434>]");
        assert_eq!(exact_output("[<J,t><M,t>][B]"), "[<B,0.2842>]");
    }

    #[test]
    fn test_joint_output() {
        assert_eq!(exact_output("[<A,f>][B,J]"), "[<B,J,0.000003>]");
    }

    #[test]
    fn test_empty_query_output() {
        assert_eq!(exact_output("[<A,t>][]"), "[]");
    }

    #[test]
    fn test_demonstration_queries_parse() {
        for (input, _) in DEMONSTRATION_QUERIES {
            let query = parse_query(input).unwrap();
            assert!(exact_inference(&query).is_ok());
        }
    }

    #[test]
    fn test_standard_cases_match_text_form() {
        let cases = standard_cases().unwrap();
        let texts = ["[<A,f>][B,J]", "[<J,t><E,f>][B,M]", "[<M,t><J,f>][B,E]"];
        for (case, text) in cases.iter().zip(texts) {
            assert_eq!(&case.query, &parse_query(text).unwrap());
        }
    }

    #[test]
    fn test_invalid_inputs_fail_before_inference() {
        assert_eq!(
            parse_query("[<X,t>][J]"),
            Err(InferenceError::InvalidNode("X".to_string()))
        );
        assert_eq!(
            parse_query("[][A,B,A]"),
            Err(InferenceError::DuplicateQueryVariable(Node::Alarm))
        );
        assert!(matches!(parse_query("[<A,maybe>][J]"), Err(InferenceError::Parse(_))));
        assert!(matches!(parse_query("J given A"), Err(InferenceError::Parse(_))));
    }
}
