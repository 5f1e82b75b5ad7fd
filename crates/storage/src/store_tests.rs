// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn named(text: &str) -> Alert {
    Alert::new("2025-01-01", "09:00:00", text)
}

fn texts(store: &AlertStore) -> Vec<&str> {
    store.list().iter().map(|a| a.text.as_str()).collect()
}

#[test]
fn append_returns_new_index() {
    let mut store = AlertStore::default();
    assert_eq!(store.append(named("a")), 0);
    assert_eq!(store.append(named("b")), 1);
    assert_eq!(texts(&store), vec!["a", "b"]);
}

#[test]
fn set_replaces_in_place() {
    let mut store = AlertStore::new(vec![named("a"), named("b")]);
    let old = store.set(1, named("c"));
    assert_eq!(old.map(|a| a.text), Some("b".to_string()));
    assert_eq!(texts(&store), vec!["a", "c"]);
}

#[test]
fn set_out_of_range_is_rejected() {
    let mut store = AlertStore::new(vec![named("a")]);
    assert!(store.set(1, named("b")).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_shifts_later_alerts_down() {
    let mut store = AlertStore::new(vec![named("a"), named("b"), named("c"), named("d")]);
    let removed = store.remove(1);
    assert_eq!(removed.map(|a| a.text), Some("b".to_string()));
    assert_eq!(texts(&store), vec!["a", "c", "d"]);
    assert_eq!(store.get(2).map(|a| a.text.as_str()), Some("d"));
    assert!(!store.contains(3));
}

#[test]
fn remove_out_of_range_is_none() {
    let mut store = AlertStore::default();
    assert!(store.remove(0).is_none());
    assert!(store.is_empty());
}
