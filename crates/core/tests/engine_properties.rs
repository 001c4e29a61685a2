//! Randomized invariants for filtering, ranking, and query truncation.
//!
//! Catalogs are drawn from a small value space so that mixed-case use cases,
//! duplicate records, and equal value scores show up in most cases.

use laprec_core::engine::{filter, query, rank, value_score, TOP_N};
use laprec_core::{Catalog, LaptopRecord, RecommendationQuery};
use proptest::prelude::*;

const CATALOG_USE_CASES: [&str; 8] =
    ["gaming", "Gaming", "GAMING", "business", "Business", "creative", "Student", "student"];

fn price_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::sample::select(vec![25_000.0, 40_000.0, 50_000.0, 60_000.0, 75_000.0, 100_000.0]),
        (1u32..=150).prop_map(|thousands| f64::from(thousands * 1_000)),
    ]
}

fn laptop_strategy() -> impl Strategy<Value = LaptopRecord> {
    (
        0usize..6,
        price_strategy(),
        prop::sample::select(vec![4.0, 8.0, 16.0, 32.0]),
        prop::sample::select(vec![128.0, 256.0, 512.0, 1024.0, 2048.0]),
        prop::sample::select(CATALOG_USE_CASES.to_vec()),
    )
        .prop_map(|(model, price, ram, storage, use_case)| {
            LaptopRecord::new(format!("Model {model}"), price, ram, storage, use_case)
        })
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(laptop_strategy(), 0..40).prop_map(Catalog::new)
}

fn requested_use_case() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["gaming", "GAMING", "Business", "creative", "STUDENT", "workstation"])
}

fn position(catalog: &Catalog, record: &LaptopRecord) -> Option<usize> {
    catalog.records().iter().position(|candidate| std::ptr::eq(candidate, record))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn filter_selects_exactly_the_matching_records(
        catalog in catalog_strategy(),
        budget in 0u64..=160_000,
        use_case in requested_use_case(),
    ) {
        let selected = filter(catalog.records(), budget, use_case);

        for record in &selected {
            prop_assert!(record.price.value() <= budget as f64, "over budget: {:?}", record);
            prop_assert_eq!(record.use_case.to_lowercase(), use_case.to_lowercase());
        }

        let expected: Vec<&LaptopRecord> = catalog
            .records()
            .iter()
            .filter(|record| {
                record.price.value() <= budget as f64
                    && record.use_case.to_lowercase() == use_case.to_lowercase()
            })
            .collect();
        prop_assert_eq!(selected.len(), expected.len());
        for (left, right) in selected.iter().zip(&expected) {
            prop_assert!(std::ptr::eq(*left, *right), "selection must keep catalog order");
        }
    }

    #[test]
    fn filter_is_idempotent(
        catalog in catalog_strategy(),
        budget in 0u64..=160_000,
        use_case in requested_use_case(),
    ) {
        let once = filter(catalog.records(), budget, use_case);
        let twice = filter(once.iter().copied(), budget, use_case);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rank_orders_by_score_and_keeps_input_order_on_ties(catalog in catalog_strategy()) {
        let ranked = rank(catalog.records().iter().collect()).expect("catalog records rank");

        let mut positions: Vec<_> =
            ranked.iter().filter_map(|record| position(&catalog, record)).collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..catalog.len()).collect::<Vec<_>>());

        for pair in ranked.windows(2) {
            let left = value_score(pair[0]).expect("score computes");
            let right = value_score(pair[1]).expect("score computes");
            prop_assert!(left >= right, "{} ranked above {}", left, right);
            if left == right {
                prop_assert!(
                    position(&catalog, pair[0]) < position(&catalog, pair[1]),
                    "equal scores must keep catalog order"
                );
            }
        }
    }

    #[test]
    fn query_returns_at_most_top_n_and_counts_every_match(
        catalog in catalog_strategy(),
        budget in 1i64..=160_000,
        use_case in requested_use_case(),
    ) {
        let request = RecommendationQuery::new(budget, use_case).expect("query validates");
        let recommendation = query(&catalog, &request).expect("query succeeds");
        let matches = filter(catalog.records(), request.budget(), request.use_case());

        prop_assert!(recommendation.laptops.len() <= TOP_N);
        prop_assert_eq!(recommendation.total_matches, matches.len());
        prop_assert_eq!(recommendation.laptops.len(), matches.len().min(TOP_N));

        let best: Vec<LaptopRecord> =
            rank(matches).expect("matches rank").into_iter().take(TOP_N).cloned().collect();
        prop_assert_eq!(recommendation.laptops, best);
    }
}
