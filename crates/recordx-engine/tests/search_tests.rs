mod common;

use common::{dispatcher_with, record, sample_dispatcher, view_names};
use recordx_core::RecordStore;
use recordx_engine::EngineConfig;

#[test]
fn test_find_falls_back_to_similar_names() {
    // GIVEN Alice Pauline and no other near match
    let mut d = dispatcher_with(
        vec![record("Alice Pauline"), record("Benson Meier")],
        EngineConfig::default(),
    );

    // WHEN searching for a misspelling
    let result = d.submit("find Alise").unwrap();

    // THEN the similarity fallback shows the record
    assert_eq!(result.feedback, "No match found, found 1 similar entries");
    assert_eq!(view_names(&d), vec!["Alice Pauline"]);
}

#[test]
fn test_exact_match_wins_over_fallback() {
    let mut d = sample_dispatcher();

    let result = d.submit("find kurz").unwrap();

    assert_eq!(result.feedback, "1 persons listed!");
    assert_eq!(view_names(&d), vec!["Carl Kurz"]);
}

#[test]
fn test_strict_threshold_disables_fallback_matches() {
    let config = EngineConfig {
        similarity_threshold: 1.0,
        ..EngineConfig::default()
    };
    let mut d = dispatcher_with(vec![record("Alice Pauline")], config);

    let result = d.submit("find Alise").unwrap();

    assert_eq!(result.feedback, "No match found, found 0 similar entries");
    assert!(view_names(&d).is_empty());
}

#[test]
fn test_list_resets_filter_and_sorts_by_birthday() {
    let mut d = sample_dispatcher();
    d.submit("find meier").unwrap();

    let result = d.submit("list s/asc").unwrap();

    assert_eq!(
        result.feedback,
        "Listed all persons by upcoming birthdays (soonest first)"
    );
    // today is 1 June: Carl on 2 June, Alice on 12 June, then no birthday
    assert_eq!(
        view_names(&d),
        vec!["Carl Kurz", "Alice Pauline", "Benson Meier", "Daniel Meier"]
    );

    d.submit("list").unwrap();
    assert_eq!(
        view_names(&d),
        vec!["Alice Pauline", "Benson Meier", "Carl Kurz", "Daniel Meier"]
    );
}

#[test]
fn test_delete_uses_filtered_view_indices() {
    let mut d = sample_dispatcher();
    d.submit("find meier").unwrap();

    d.submit("delete 2").unwrap();
    d.submit("y").unwrap();

    let remaining: Vec<String> = d
        .store()
        .records()
        .iter()
        .map(|r| r.summary().to_string())
        .collect();
    assert_eq!(remaining, vec!["Alice Pauline", "Benson Meier", "Carl Kurz"]);
}
