use drift_monitor::{
    EngineConfig,
    column::{DistType, VariableType},
    compare,
    config::ExecutionMode,
};
use proptest::prelude::*;

fn numeric_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (-5i32..20).prop_map(|v| v.to_string()),
        2 => (0u8..40).prop_map(|v| format!("{}.5", v)),
        1 => Just(String::new()),
        1 => Just("bad".to_string()),
    ]
}

fn text_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => prop::sample::select(vec!["red", "green", "blue", "teal"]).prop_map(str::to_string),
        1 => Just(String::new()),
    ]
}

fn dataset(rows: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec((numeric_cell(), text_cell()), rows).prop_map(|body| {
        let mut records = vec![vec!["amount".to_string(), "colour".to_string()]];
        records.extend(body.into_iter().map(|(n, t)| vec![n, t]));
        records
    })
}

proptest! {
    #[test]
    fn frequencies_and_buckets_account_for_every_observed_row(
        reference in dataset(1..60),
        current in dataset(1..60),
    ) {
        let report = compare(reference, current, &EngineConfig::default()).expect("compare");
        for stats in [&report.original_data, &report.current_data] {
            for (_, column) in stats.iter() {
                let observed = column.observed_count();
                if column.dist_type == DistType::NonUnique {
                    prop_assert_eq!(
                        column.unique_items_count_values.iter().sum::<usize>(),
                        observed
                    );
                }
                if let Some(buckets) = column.quantile_data_distribution {
                    prop_assert_eq!(column.variable_type, VariableType::Continuous);
                    prop_assert_eq!(
                        buckets.iter().sum::<usize>() + column.excluded_zero_count,
                        observed
                    );
                }
            }
        }
    }

    #[test]
    fn unique_reference_columns_never_scored_and_scores_are_finite(
        reference in dataset(1..60),
        current in dataset(1..60),
    ) {
        let report = compare(reference, current, &EngineConfig::default()).expect("compare");
        for (name, column) in report.original_data.iter() {
            let scored = report.stability_index_values.contains(name);
            prop_assert_eq!(scored, column.dist_type == DistType::NonUnique);
        }
        for (_, psi) in report.stability_index_values.iter() {
            prop_assert!(psi.is_finite());
            prop_assert!(psi >= 0.0);
        }
    }

    #[test]
    fn self_comparison_scores_zero(reference in dataset(1..60)) {
        let report = compare(reference.clone(), reference, &EngineConfig::default())
            .expect("compare");
        for (_, psi) in report.stability_index_values.iter() {
            prop_assert_eq!(psi, 0.0);
        }
    }

    #[test]
    fn execution_mode_does_not_change_the_report(
        reference in dataset(1..40),
        current in dataset(1..40),
    ) {
        let sequential = compare(reference.clone(), current.clone(), &EngineConfig::default())
            .expect("sequential");
        let parallel = compare(
            reference,
            current,
            &EngineConfig {
                execution: ExecutionMode::ForkJoin,
                ..EngineConfig::default()
            },
        )
        .expect("fork-join");
        prop_assert_eq!(sequential, parallel);
    }
}
