#[cfg(test)]
mod test_exact_inference {
    use alarmnet::inference::{ExactEngine, SUM_TOLERANCE, exact_inference};
    use alarmnet::network::combination;
    use alarmnet::{Assignment, BayesNetwork, Node, Query};

    fn query(variables: Vec<Node>, evidence: Assignment) -> Query {
        Query::new(variables, evidence).unwrap()
    }

    /// Every partial assignment of the five nodes (3^5 of them).
    fn all_evidence() -> Vec<Assignment> {
        let mut result = vec![Assignment::new()];
        for node in Node::TOPOLOGICAL {
            let mut next = Vec::with_capacity(result.len() * 3);
            for partial in &result {
                next.push(*partial);
                next.push(partial.with(node, true));
                next.push(partial.with(node, false));
            }
            result = next;
        }
        result
    }

    /// Every non-empty subset of nodes, in topological order.
    fn all_query_sets() -> Vec<Vec<Node>> {
        (1..32u32)
            .map(|mask| {
                Node::TOPOLOGICAL
                    .iter()
                    .copied()
                    .filter(|node| mask & (1 << node.index()) != 0)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_posteriors_sum_to_one() {
        let network = BayesNetwork::alarm();
        let engine = ExactEngine::new(&network);
        let evidence_sets = all_evidence();
        assert_eq!(evidence_sets.len(), 243);
        for variables in all_query_sets() {
            for evidence in &evidence_sets {
                let posterior = engine.infer(&query(variables.clone(), *evidence)).unwrap();
                assert_eq!(posterior.len(), 1 << variables.len());
                assert!(!posterior.is_degenerate());
                assert!(
                    (posterior.total() - 1.0).abs() < SUM_TOLERANCE,
                    "P({:?} | {}) sums to {}",
                    variables,
                    evidence,
                    posterior.total()
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let q = query(
            vec![Node::Burglary, Node::Earthquake],
            Assignment::from([(Node::MaryCalls, true), (Node::JohnCalls, false)]),
        );
        let first = exact_inference(&q).unwrap();
        for _ in 0..5 {
            let again = exact_inference(&q).unwrap();
            let bits: Vec<u64> = again.probabilities().iter().map(|p| p.to_bits()).collect();
            let expected: Vec<u64> = first.probabilities().iter().map(|p| p.to_bits()).collect();
            assert_eq!(bits, expected);
        }
    }

    #[test]
    fn test_burglary_prior() {
        let posterior = exact_inference(&query(vec![Node::Burglary], Assignment::new())).unwrap();
        assert_eq!(posterior.get(&[true]), Some(0.001));
        assert_eq!(posterior.get(&[false]), Some(0.999));
    }

    #[test]
    fn test_earthquake_prior() {
        let posterior = exact_inference(&query(vec![Node::Earthquake], Assignment::new())).unwrap();
        assert_eq!(posterior.get(&[true]), Some(0.002));
        assert_eq!(posterior.get(&[false]), Some(0.998));
    }

    #[test]
    fn test_empty_query_is_certain() {
        let posterior = exact_inference(&query(vec![], Assignment::new())).unwrap();
        assert_eq!(posterior.get(&[]), Some(1.0));
        assert!(!posterior.is_degenerate());
    }

    #[test]
    fn test_textbook_conditionals() {
        let john = exact_inference(&query(
            vec![Node::JohnCalls],
            Assignment::from([(Node::Alarm, true)]),
        ))
        .unwrap();
        assert!((john.get(&[true]).unwrap() - 0.90).abs() < 1e-9);

        let mary = exact_inference(&query(
            vec![Node::MaryCalls],
            Assignment::from([(Node::Alarm, false)]),
        ))
        .unwrap();
        assert!((mary.get(&[true]).unwrap() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_burglary_given_both_calls() {
        // Classic result: P(B | j, m) is roughly 0.284.
        let posterior = exact_inference(&query(
            vec![Node::Burglary],
            Assignment::from([(Node::JohnCalls, true), (Node::MaryCalls, true)]),
        ))
        .unwrap();
        assert!((posterior.get(&[true]).unwrap() - 0.2841718).abs() < 1e-6);
    }

    #[test]
    fn test_joint_query_matches_brute_force() {
        let network = BayesNetwork::alarm();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for index in 0..32 {
            let values = combination(index, Node::COUNT);
            let sample: Assignment = Node::TOPOLOGICAL.iter().copied().zip(values).collect();
            if sample.get(Node::Alarm) != Some(false) {
                continue;
            }
            let p = network.joint_probability(&sample).unwrap();
            denominator += p;
            if sample.get(Node::Burglary) == Some(true) && sample.get(Node::JohnCalls) == Some(true) {
                numerator += p;
            }
        }
        let brute_force = numerator / denominator;

        let posterior = ExactEngine::new(&network)
            .infer(&query(
                vec![Node::Burglary, Node::JohnCalls],
                Assignment::from([(Node::Alarm, false)]),
            ))
            .unwrap();
        let exact = posterior.get(&[true, true]).unwrap();
        assert!((exact - brute_force).abs() <= 1e-9 * brute_force);
    }

    #[test]
    fn test_query_overlapping_evidence_is_forced() {
        let posterior = exact_inference(&query(
            vec![Node::JohnCalls, Node::Alarm],
            Assignment::from([(Node::Alarm, false)]),
        ))
        .unwrap();
        assert_eq!(posterior.get(&[true, true]), Some(0.0));
        assert_eq!(posterior.get(&[false, true]), Some(0.0));
        assert!((posterior.get(&[true, false]).unwrap() - 0.05).abs() < 1e-9);
    }
}
