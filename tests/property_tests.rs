//! Property tests for query-state serialization and bounded lists

use proptest::prelude::*;
use query_navigator::{ChangeView, FifoCodec, FifoOutcome, QueryState};

fn arb_text() -> impl Strategy<Value = String> {
    // Includes separators, '+', '%', and multi-byte characters.
    "[a-zA-Z0-9 &=?#%+,;/é☃_-]{0,12}"
}

fn arb_token() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,3}"
}

proptest! {
    #[test]
    fn prop_round_trip(pairs in prop::collection::vec((arb_text(), arb_text()), 0..10)) {
        let mut state = QueryState::new();
        for (key, value) in &pairs {
            state.set(key.clone(), value.clone());
        }

        let parsed = QueryState::parse(&state.to_url()).unwrap();
        prop_assert_eq!(parsed, state);
    }

    #[test]
    fn prop_fifo_bounded_and_unique(tokens in prop::collection::vec(arb_token(), 0..30)) {
        let codec = FifoCodec::default();
        let mut state = QueryState::new();
        for token in &tokens {
            codec.push(&mut state, "_list", token);
        }

        let list = codec.list(&state, "_list");
        prop_assert!(list.len() <= 5);
        let mut deduped = list.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), list.len());

        if let Some(last) = tokens.last() {
            prop_assert_eq!(list.last(), Some(last));
        }
    }

    #[test]
    fn prop_fifo_matches_reference_model(tokens in prop::collection::vec(arb_token(), 0..30)) {
        let codec = FifoCodec::default();
        let mut state = QueryState::new();
        let mut model: Vec<String> = Vec::new();

        for token in &tokens {
            let outcome = codec.push(&mut state, "_list", token);
            let expected = if model.last() == Some(token) {
                FifoOutcome::Unchanged
            } else if let Some(pos) = model.iter().position(|t| t == token) {
                let moved = model.remove(pos);
                model.push(moved);
                FifoOutcome::Reordered
            } else {
                if model.len() == 5 {
                    model.remove(0);
                }
                model.push(token.clone());
                FifoOutcome::Added
            };
            prop_assert_eq!(outcome, expected);
        }

        prop_assert_eq!(codec.list(&state, "_list"), model);
    }

    #[test]
    fn prop_fifo_survives_serialization(tokens in prop::collection::vec("[a-z]{1,3}", 1..12)) {
        let codec = FifoCodec::default();
        let mut state = QueryState::new();
        for token in &tokens {
            codec.push(&mut state, "_list", token);
        }

        let parsed = QueryState::parse(&state.to_url()).unwrap();
        prop_assert_eq!(codec.list(&parsed, "_list"), codec.list(&state, "_list"));
    }

    #[test]
    fn prop_identical_states_have_no_changes(pairs in prop::collection::vec((arb_text(), arb_text()), 0..8)) {
        let state: QueryState = pairs.into_iter().collect();
        let view = ChangeView::new(state.clone(), state.clone());
        prop_assert!(view.is_empty());
        let keys: Vec<&str> = state.keys().collect();
        prop_assert!(!view.one_modified(&keys));
        prop_assert!(!view.todo(&keys));
    }
}

#[test]
fn test_seven_distinct_tokens_keep_last_five() {
    let codec = FifoCodec::default();
    let mut state = QueryState::new();
    for token in ["t1", "t2", "t3", "t4", "t5", "t6", "t7"] {
        codec.push(&mut state, "_recent", token);
    }
    assert_eq!(
        codec.list(&state, "_recent"),
        vec!["t3", "t4", "t5", "t6", "t7"]
    );
}
