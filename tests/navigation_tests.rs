//! Integration tests for the navigation engine
//!
//! Covers the push / push_silent / pop / clear protocol against both the
//! in-memory history and a call-recording provider.

mod common;

use common::*;
use query_navigator::*;
use std::cell::RefCell;
use std::rc::Rc;

// ---- provider protocol ----

#[test]
fn test_push_creates_back_navigable_entry() {
    let mut engine = memory_engine("/app?page=1");

    engine.push(Mutation::set("x", "1")).unwrap();
    assert_eq!(engine.current(), &state(&[("page", "1"), ("x", "1")]));

    assert!(engine.back().unwrap());
    assert_eq!(engine.current(), &state(&[("page", "1")]));
    assert_eq!(engine.provider().location(), "/app?page=1");
}

#[test]
fn test_push_silent_is_not_back_navigable() {
    let mut engine = memory_engine("/app?page=1");

    engine.push_silent(Mutation::set("x", "1")).unwrap();
    assert_eq!(engine.current(), &state(&[("page", "1"), ("x", "1")]));

    assert!(!engine.back().unwrap());
    assert_eq!(engine.current(), &state(&[("page", "1"), ("x", "1")]));
    assert_eq!(engine.provider().location(), "/app?page=1&x=1");
}

#[test]
fn test_provider_receives_serialized_state() {
    let mut engine = NavigationEngine::new(RecordingProvider::at("/app?a=1")).unwrap();

    engine.push(Mutations::new().set("b", "two words")).unwrap();
    engine.push_silent(Mutations::new().delete("a")).unwrap();
    engine.clear().unwrap();

    assert_eq!(
        engine.provider().calls,
        vec![
            ProviderCall::Push("?a=1&b=two%20words".to_string()),
            ProviderCall::Replace("?b=two%20words".to_string()),
            ProviderCall::Replace("?".to_string()),
        ]
    );
}

#[test]
fn test_pop_does_not_touch_provider() {
    let mut engine = NavigationEngine::new(RecordingProvider::at("/app?a=2&b=3")).unwrap();
    engine.pop("/app?a=1").unwrap();
    assert!(engine.provider().calls.is_empty());
}

// ---- pop synchronization ----

#[test]
fn test_pop_synchronizes_and_reports_diff() {
    let mut engine = memory_engine("/app?a=2&b=3");
    let views = Rc::new(RefCell::new(Vec::new()));
    engine.subscribe(retaining_subscriber(&views));

    engine.pop("/app?a=1").unwrap();

    assert_eq!(engine.current(), &state(&[("a", "1")]));
    assert_eq!(engine.previous(), &state(&[("a", "2"), ("b", "3")]));

    let views = views.borrow();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].debug(), "* a: 2 > 1\n- b: 3");
}

#[test]
fn test_pop_with_bad_url_leaves_state_alone() {
    let mut engine = memory_engine("/app?a=2");
    let log = call_log();
    engine.subscribe(recording_subscriber("s", &log));

    let err = engine.pop("/app?a=\u{0}").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(engine.current(), &state(&[("a", "2")]));
    assert!(engine.previous().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_pop_with_malformed_escape_keeps_it_literal() {
    let mut engine = memory_engine("/app?a=2");
    engine.pop("/app?a=%zz&b=%E2%82").unwrap();
    assert_eq!(engine.current().get("a"), Some("%zz"));
    assert_eq!(engine.current().get("b"), Some("\u{FFFD}"));
    assert_eq!(engine.previous().get("a"), Some("2"));
}

#[test]
fn test_back_and_forward_round_trip() {
    let mut engine = memory_engine("/app");
    engine.push(Mutation::set("step", "1")).unwrap();
    engine.push(Mutation::set("step", "2")).unwrap();

    engine.back().unwrap();
    assert_eq!(engine.current().get("step"), Some("1"));
    engine.back().unwrap();
    assert!(engine.current().is_empty());
    engine.forward().unwrap();
    engine.forward().unwrap();
    assert_eq!(engine.current().get("step"), Some("2"));
    assert_eq!(engine.previous().get("step"), Some("1"));
    assert!(!engine.forward().unwrap());
}

// ---- subscribers ----

#[test]
fn test_subscribers_notified_in_registration_order() {
    let mut engine = memory_engine("/app");
    let log = call_log();
    engine.subscribe(recording_subscriber("first", &log));
    engine.subscribe(recording_subscriber("second", &log));
    assert_eq!(engine.subscriber_count(), 2);

    engine.push(Mutation::set("a", "1")).unwrap();
    engine.back().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["first:a=1", "second:a=1", "first:", "second:"]
    );
}

#[test]
fn test_subscribers_share_one_view() {
    let mut engine = memory_engine("/app");
    let views = Rc::new(RefCell::new(Vec::new()));
    engine.subscribe(retaining_subscriber(&views));
    engine.subscribe(retaining_subscriber(&views));

    engine.push(Mutation::set("a", "1")).unwrap();

    let views = views.borrow();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0], views[1]);
}

#[test]
fn test_retained_view_is_unaffected_by_later_pushes() {
    let mut engine = memory_engine("/app?a=1");
    let views = Rc::new(RefCell::new(Vec::new()));
    engine.subscribe(retaining_subscriber(&views));

    engine.push(Mutation::set("a", "2")).unwrap();
    engine.push(Mutation::set("a", "3")).unwrap();

    let views = views.borrow();
    assert_eq!(views[0].previous().get("a"), Some("1"));
    assert_eq!(views[0].current().get("a"), Some("2"));
    assert_eq!(views[1].previous().get("a"), Some("2"));
    assert_eq!(views[1].current().get("a"), Some("3"));
}

#[test]
fn test_failing_subscriber_stops_fan_out() {
    let mut engine = memory_engine("/app");
    let log = call_log();
    engine.subscribe(recording_subscriber("first", &log));
    engine.subscribe(failing_subscriber("broken", &log));
    engine.subscribe(recording_subscriber("last", &log));

    let err = engine.push(Mutation::set("a", "1")).unwrap_err();

    assert!(err.is_subscriber());
    assert_eq!(err.to_string(), "subscriber 'FnSubscriber' failed: broken exploded");
    assert_eq!(*log.borrow(), vec!["first:a=1", "broken:failed"]);
    // the transition itself already happened
    assert_eq!(engine.current().get("a"), Some("1"));
    assert_eq!(engine.provider().len(), 2);
}

#[test]
fn test_silent_push_and_clear_do_not_notify() {
    let mut engine = memory_engine("/app?a=1");
    let log = call_log();
    engine.subscribe(recording_subscriber("s", &log));

    engine.push_silent(Mutation::set("a", "2")).unwrap();
    engine.clear().unwrap();

    assert!(log.borrow().is_empty());
}

#[test]
fn test_view_after_silent_push_compares_against_last_notified_state() {
    let mut engine = memory_engine("/app?a=1");
    let views = Rc::new(RefCell::new(Vec::new()));
    engine.subscribe(retaining_subscriber(&views));

    engine.push(Mutation::set("a", "2")).unwrap();
    engine.push_silent(Mutation::set("b", "x")).unwrap();
    engine.push(Mutation::set("c", "y")).unwrap();

    let views = views.borrow();
    assert_eq!(views[1].previous(), &state(&[("a", "2"), ("b", "x")]));
    assert_eq!(views[1].changed_keys(), vec!["c"]);
}

// ---- provider errors ----

#[test]
fn test_provider_rejection_propagates() {
    let mut provider = RecordingProvider::at("/app");
    provider.reject = true;
    let mut engine = NavigationEngine::new(provider).unwrap();
    let log = call_log();
    engine.subscribe(recording_subscriber("s", &log));

    let err = engine.push(Mutation::set("a", "1")).unwrap_err();
    assert!(err.is_provider());
    assert!(log.borrow().is_empty());

    assert!(engine.push_silent(Mutation::set("a", "1")).unwrap_err().is_provider());
    assert!(engine.clear().unwrap_err().is_provider());
}

#[test]
fn test_rejected_push_keeps_mutation_without_notifying() {
    let mut engine = NavigationEngine::new(RecordingProvider::at("/app?a=1")).unwrap();
    let log = call_log();
    engine.subscribe(recording_subscriber("s", &log));

    engine.push(Mutation::set("a", "2")).unwrap();
    engine.provider_mut().reject = true;
    let err = engine.push(Mutation::set("a", "3")).unwrap_err();

    assert!(err.is_provider());
    // no rollback: the snapshots moved even though the entry was refused
    assert_eq!(engine.current(), &state(&[("a", "3")]));
    assert_eq!(engine.previous(), &state(&[("a", "2")]));
    assert_eq!(*log.borrow(), vec!["s:a=2"]);
    assert_eq!(
        engine.provider().calls,
        vec![ProviderCall::Push("?a=2".to_string())]
    );
}

// ---- fifo keys ----

#[test]
fn test_fifo_keys_through_engine() {
    let mut engine = memory_engine("/app");
    let partial = engine.infer_mutations([
        ("_open", Some("doc1")),
        ("view", Some("grid")),
    ]);
    engine.push(partial).unwrap();
    engine.push(Mutation::push_fifo("_open", "doc2")).unwrap();
    engine.push(Mutation::push_fifo("_open", "doc1")).unwrap();

    assert_eq!(engine.fifo_list("_open"), vec!["doc2", "doc1"]);
    assert_eq!(
        engine.last_fifo_outcomes(),
        [("_open".to_string(), FifoOutcome::Reordered)]
    );

    engine.push(Mutation::push_fifo("_open", "doc1")).unwrap();
    assert_eq!(
        engine.last_fifo_outcomes(),
        [("_open".to_string(), FifoOutcome::Unchanged)]
    );
    assert_eq!(engine.url(), "?_open=doc2,doc1&view=grid");
}

#[test]
fn test_fifo_key_can_be_deleted() {
    let mut engine = memory_engine("/app?_open=a,b");
    let partial = engine.infer_mutations([("_open", None::<&str>)]);
    engine.push(partial).unwrap();
    assert!(!engine.current().has("_open"));
    assert!(engine.last_fifo_outcomes().is_empty());
}

#[test]
fn test_fifo_history_survives_back_navigation() {
    let mut engine = memory_engine("/app");
    for doc in ["a", "b", "c", "d", "e", "f"] {
        engine.push(Mutation::push_fifo("_open", doc)).unwrap();
    }
    assert_eq!(engine.fifo_list("_open"), vec!["b", "c", "d", "e", "f"]);

    engine.back().unwrap();
    assert_eq!(engine.fifo_list("_open"), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_oversized_list_from_url_is_bounded_after_promotion() {
    let mut engine = memory_engine("/app?_open=a,b,c,d,e,f,g");
    engine.push(Mutation::push_fifo("_open", "b")).unwrap();

    assert_eq!(engine.fifo_list("_open"), vec!["d", "e", "f", "g", "b"]);
    assert_eq!(
        engine.last_fifo_outcomes(),
        [("_open".to_string(), FifoOutcome::Reordered)]
    );
}

// ---- configuration ----

#[test]
fn test_custom_fifo_configuration() {
    let config = EngineConfig::new()
        .fifo_capacity(2)
        .fifo_delimiter('.')
        .fifo_prefix("$");
    let mut engine = NavigationEngine::with_config(MemoryHistory::new("/app"), config).unwrap();

    let partial = engine.infer_mutations([("$tabs", Some("a"))]);
    engine.push(partial).unwrap();
    let partial = engine.infer_mutations([("$tabs", Some("b"))]);
    engine.push(partial).unwrap();
    let partial = engine.infer_mutations([("$tabs", Some("c"))]);
    engine.push(partial).unwrap();

    assert_eq!(engine.current().get("$tabs"), Some("b.c"));
    assert_eq!(engine.url(), "?%24tabs=b.c");
}
