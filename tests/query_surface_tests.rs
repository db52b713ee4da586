use proptest::prelude::*;

use claimscope_lib::{
    core::types::ClaimRow,
    query::{
        search::ClaimDataset,
        sort::{sort_rows, SortDirection, SortKey, SortState},
        view::{query_rows, BrowserState},
    },
};

fn row(idx: usize, claim: &str, category: &str, context: &str) -> ClaimRow {
    ClaimRow {
        id: format!("claim-{idx}"),
        claim: claim.to_string(),
        category: category.to_string(),
        context: context.to_string(),
        sources: vec![],
        keywords: None,
    }
}

fn position(row: &ClaimRow) -> usize {
    row.id
        .trim_start_matches("claim-")
        .parse()
        .unwrap_or_else(|err| panic!("bad row id {}: {err}", row.id))
}

fn ids(rows: &[&ClaimRow]) -> Vec<String> {
    rows.iter().map(|row| row.id.clone()).collect()
}

fn sample() -> Vec<ClaimRow> {
    vec![
        row(0, "AI models need large datasets", "Technology", "Training"),
        row(1, "Coffee prices rose in 2023", "Economy", "Market report"),
        row(2, "Regulators are studying AI safety", "Policy", "Hearings"),
        row(3, "Solar output doubled", "energy", "Grid data on ai forecasting"),
    ]
}

#[test]
fn search_is_case_insensitive_and_keeps_dataset_order() {
    let dataset = ClaimDataset::new(sample());
    for query in ["ai", "AI", "  Ai  "] {
        let found = dataset.filter(query);
        assert_eq!(ids(&found), vec!["claim-0", "claim-2", "claim-3"]);
    }
}

#[test]
fn search_covers_context_and_category() {
    let dataset = ClaimDataset::new(sample());
    assert_eq!(ids(&dataset.filter("market")), vec!["claim-1"]);
    assert_eq!(ids(&dataset.filter("POLICY")), vec!["claim-2"]);
    assert!(dataset.filter("nonexistent").is_empty());
}

#[test]
fn blank_query_matches_everything() {
    let dataset = ClaimDataset::new(sample());
    assert_eq!(dataset.filter("").len(), 4);
    assert_eq!(dataset.filter("   \t").len(), 4);
}

#[test]
fn index_is_built_with_the_dataset() {
    let dataset = ClaimDataset::new(sample());
    assert_eq!(
        dataset.index_entry(1),
        Some("coffee prices rose in 2023 market report economy")
    );
    assert_eq!(dataset.index_entry(9), None);

    let replaced = ClaimDataset::new(vec![row(0, "Other", "General", "")]);
    assert_ne!(replaced.version(), dataset.version());
    assert_eq!(replaced.index_entry(0), Some("other  general"));
}

#[test]
fn sorting_by_category_ignores_case_and_leaves_source_untouched() {
    let dataset = ClaimDataset::new(sample());
    let all = dataset.filter("");
    let sorted = sort_rows(&all, SortState::default());

    assert_eq!(ids(&sorted), vec!["claim-1", "claim-3", "claim-2", "claim-0"]);
    assert_eq!(ids(&all), vec!["claim-0", "claim-1", "claim-2", "claim-3"]);

    let descending = sort_rows(
        &all,
        SortState {
            key: SortKey::Category,
            direction: SortDirection::Descending,
        },
    );
    assert_eq!(ids(&descending), vec!["claim-0", "claim-2", "claim-3", "claim-1"]);
}

#[test]
fn equal_keys_keep_relative_order_in_both_directions() {
    let rows = vec![
        row(0, "b", "Same", ""),
        row(1, "a", "same", ""),
        row(2, "c", "Other", ""),
        row(3, "d", "SAME", ""),
    ];
    let dataset = ClaimDataset::new(rows);
    let all = dataset.filter("");

    let asc = sort_rows(&all, SortState::default());
    assert_eq!(ids(&asc), vec!["claim-2", "claim-0", "claim-1", "claim-3"]);

    let desc = sort_rows(&all, SortState::default().select(SortKey::Category));
    assert_eq!(ids(&desc), vec!["claim-0", "claim-1", "claim-3", "claim-2"]);
}

#[test]
fn browser_state_filters_then_sorts() {
    let state = BrowserState::with_rows(sample())
        .with_search("ai")
        .with_sort_key(SortKey::Claim);

    assert_eq!(state.sort.key, SortKey::Claim);
    assert_eq!(state.sort.direction, SortDirection::Ascending);
    assert_eq!(ids(&state.visible_rows()), vec!["claim-0", "claim-2", "claim-3"]);

    let flipped = state.with_sort_key(SortKey::Claim);
    assert_eq!(ids(&flipped.visible_rows()), vec!["claim-3", "claim-2", "claim-0"]);
    assert_eq!(ids(&state.visible_rows()), vec!["claim-0", "claim-2", "claim-3"]);
    assert_eq!(flipped.dataset.version(), state.dataset.version());
}

#[test]
fn query_rows_on_empty_dataset_is_empty() {
    let dataset = ClaimDataset::default();
    assert!(dataset.is_empty());
    assert!(query_rows(&dataset, "anything", SortState::default()).is_empty());
}

fn arb_rows() -> impl Strategy<Value = Vec<ClaimRow>> {
    prop::collection::vec(("[aAbB]{0,2}", "[xXy]{0,1}", "[mn ]{0,2}"), 0..24).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, (claim, category, context))| row(idx, &claim, &category, &context))
            .collect()
    })
}

fn arb_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Claim),
        Just(SortKey::Category),
        Just(SortKey::Context)
    ]
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn key_of(row: &ClaimRow, key: SortKey) -> String {
    match key {
        SortKey::Claim => row.claim.to_lowercase(),
        SortKey::Category => row.category.to_lowercase(),
        SortKey::Context => row.context.to_lowercase(),
    }
}

proptest! {
    #[test]
    fn sort_is_stable_and_repeatable(
        rows in arb_rows(),
        query in "[abxm]{0,1}",
        key in arb_key(),
        direction in arb_direction(),
    ) {
        let dataset = ClaimDataset::new(rows);
        let state = SortState { key, direction };
        let filtered = dataset.filter(&query);

        let once = sort_rows(&filtered, state);
        let twice = sort_rows(&once, state);
        prop_assert_eq!(ids(&once), ids(&twice));
        prop_assert_eq!(once.len(), filtered.len());

        for pair in once.windows(2) {
            let (left, right) = (key_of(pair[0], key), key_of(pair[1], key));
            match direction {
                SortDirection::Ascending => prop_assert!(left <= right),
                SortDirection::Descending => prop_assert!(left >= right),
            }
            if left == right {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
    }

    #[test]
    fn filtered_rows_are_a_subsequence_of_the_dataset(rows in arb_rows(), query in "[abxym ]{0,2}") {
        let dataset = ClaimDataset::new(rows);
        let positions = dataset.filter(&query).iter().map(|row| position(row)).collect::<Vec<_>>();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
