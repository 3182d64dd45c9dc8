//! Tests for DeclarationId.

use std::collections::HashSet;

use ferrobind_foundation::DeclarationId;

#[test]
fn fresh_ids_never_collide() {
    let ids: HashSet<_> = (0..1000).map(|_| DeclarationId::fresh()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn ids_are_copyable_value_keys() {
    let id = DeclarationId::fresh();
    let copy = id;
    assert_eq!(id, copy);

    let mut set = HashSet::new();
    set.insert(id);
    assert!(set.contains(&copy));
}

#[test]
fn ids_order_by_allocation() {
    let first = DeclarationId::fresh();
    let second = DeclarationId::fresh();
    assert!(first < second);
}

#[test]
fn display_is_hash_prefixed() {
    let id = DeclarationId::fresh();
    let shown = format!("{id}");
    assert!(shown.starts_with('#'));
    assert_eq!(shown[1..].parse::<u64>().unwrap(), id.raw());
}
