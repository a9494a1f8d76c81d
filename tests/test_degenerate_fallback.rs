#[cfg(test)]
mod test_degenerate_fallback {
    use alarmnet::inference::{ExactEngine, run_trials};
    use alarmnet::{Assignment, BayesNetwork, Node, Query, SamplingEngine, SamplingMethod};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Burglary can never happen in this network.
    fn no_burglary_network() -> BayesNetwork {
        BayesNetwork::alarm().with_table(Node::Burglary, vec![0.0]).unwrap()
    }

    fn impossible_query() -> Query {
        Query::new(
            vec![Node::JohnCalls, Node::MaryCalls],
            Assignment::from([(Node::Burglary, true)]),
        )
        .unwrap()
    }

    #[test]
    fn test_exact_falls_back_to_uniform() {
        let network = no_burglary_network();
        let posterior = ExactEngine::new(&network).infer(&impossible_query()).unwrap();
        assert!(posterior.is_degenerate());
        assert_eq!(posterior.probabilities(), &[0.25; 4]);
        assert!(posterior.probabilities().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_samplers_fall_back_to_uniform() {
        let network = no_burglary_network();
        let engine = SamplingEngine::new(&network);
        let query = impossible_query();
        for method in SamplingMethod::ALL {
            let mut rng = StdRng::seed_from_u64(8);
            let posterior = engine.estimate(method, &query, 2_000, &mut rng).unwrap();
            assert!(posterior.is_degenerate(), "{} should be degenerate", method);
            assert_eq!(posterior.probabilities(), &[0.25; 4]);
        }
    }

    #[test]
    fn test_empty_query_still_falls_back() {
        let network = no_burglary_network();
        let query = Query::new(vec![], Assignment::from([(Node::Burglary, true)])).unwrap();
        let exact = ExactEngine::new(&network).infer(&query).unwrap();
        assert!(exact.is_degenerate());
        assert_eq!(exact.probabilities(), &[1.0]);

        let engine = SamplingEngine::new(&network);
        for method in SamplingMethod::ALL {
            let mut rng = StdRng::seed_from_u64(5);
            let posterior = engine.estimate(method, &query, 10, &mut rng).unwrap();
            assert!(posterior.is_degenerate(), "{} should be degenerate", method);
            assert_eq!(posterior.probabilities(), &[1.0]);
        }
    }

    #[test]
    fn test_empty_query_weighting_keeps_mass() {
        // Rare but possible evidence: likelihood weighting always has weight.
        let network = BayesNetwork::alarm();
        let engine = SamplingEngine::new(&network);
        let query = Query::new(
            vec![],
            Assignment::from([(Node::Burglary, true), (Node::Earthquake, true)]),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let weighted = engine.likelihood_weighting(&query, 10, &mut rng).unwrap();
        assert!(!weighted.is_degenerate());
        assert_eq!(weighted.probabilities(), &[1.0]);
    }

    #[test]
    fn test_zero_weight_from_deterministic_child() {
        // The alarm never rings without a burglary or earthquake, and neither
        // happens: evidence A = true has zero likelihood for every sample.
        let network = BayesNetwork::alarm()
            .with_table(Node::Alarm, vec![0.95, 0.94, 0.29, 0.0])
            .unwrap()
            .with_table(Node::Burglary, vec![0.0])
            .unwrap()
            .with_table(Node::Earthquake, vec![0.0])
            .unwrap();
        let engine = SamplingEngine::new(&network);
        let query = Query::new(vec![Node::JohnCalls], Assignment::from([(Node::Alarm, true)])).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let weighted = engine.likelihood_weighting(&query, 1_000, &mut rng).unwrap();
        assert!(weighted.is_degenerate());
        assert_eq!(weighted.probabilities(), &[0.5, 0.5]);
    }

    #[test]
    fn test_genuine_uniform_not_flagged() {
        let network = BayesNetwork::alarm()
            .with_table(Node::Burglary, vec![0.5])
            .unwrap();
        let query = Query::new(vec![Node::Burglary], Assignment::new()).unwrap();
        let posterior = ExactEngine::new(&network).infer(&query).unwrap();
        assert!(!posterior.is_degenerate());
        assert!((posterior.get(&[true]).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_trials_count_degenerate_runs() {
        let network = no_burglary_network();
        let engine = SamplingEngine::new(&network);
        let report = run_trials(&engine, SamplingMethod::Rejection, &impossible_query(), 100, 4, 9).unwrap();
        assert_eq!(report.degenerate_trials, 4);
        assert!(report.mean.is_degenerate());
        assert_eq!(report.estimates, vec![0.25; 4]);
    }

    #[test]
    fn test_single_sample_may_be_degenerate() {
        // One draw from the textbook network almost never matches rare evidence.
        let network = BayesNetwork::alarm();
        let engine = SamplingEngine::new(&network);
        let query = Query::new(
            vec![Node::Burglary],
            Assignment::from([(Node::Alarm, true), (Node::Earthquake, true)]),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let posterior = engine.prior_sampling(&query, 1, &mut rng).unwrap();
        assert!((posterior.total() - 1.0).abs() < 1e-12);
    }
}
