use chartflow::cache_args;
use chartflow::core::{CacheNamespace, CacheStore, ExtraKey, ExtraStore};

#[test]
fn cache_entry_survives_one_unused_pass() {
    let namespace = CacheNamespace::new("label_width");
    let mut cache = CacheStore::new();
    cache.set(namespace, cache_args!["100.5", 12.0], 42.0_f64);

    cache.purge();
    assert_eq!(cache.get::<f64>(namespace, cache_args!["100.5", 12.0]), Some(&42.0));

    cache.purge();
    cache.purge();
    assert_eq!(cache.get::<f64>(namespace, cache_args!["100.5", 12.0]), None);
}

#[test]
fn requested_entries_are_promoted() {
    let namespace = CacheNamespace::new("label_width");
    let mut cache = CacheStore::new();
    cache.set(namespace, cache_args![1_i64], "one".to_owned());

    for _ in 0..5 {
        cache.purge();
        assert_eq!(
            cache.get::<String>(namespace, cache_args![1_i64]).map(String::as_str),
            Some("one")
        );
    }
    let stats = cache.stats();
    assert_eq!(stats.hits, 5);
    assert_eq!(stats.current_size, 1);
    assert_eq!(stats.previous_size, 0);
}

#[test]
fn get_or_set_computes_once() {
    let namespace = CacheNamespace::new("measure");
    let mut cache = CacheStore::new();
    let mut computed = 0;

    for _ in 0..3 {
        let value = *cache.get_or_set(namespace, cache_args![true, 3_usize], || {
            computed += 1;
            7_u32
        });
        assert_eq!(value, 7);
    }
    assert_eq!(computed, 1);
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 2);
}

#[test]
fn namespaces_and_types_do_not_collide() {
    let first = CacheNamespace::new("shared");
    let second = CacheNamespace::new("shared");
    let mut cache = CacheStore::new();
    cache.set(first, cache_args![1_i64], 1.0_f64);

    assert_eq!(cache.get::<f64>(second, cache_args![1_i64]), None);
    assert_eq!(cache.get::<u32>(first, cache_args![1_i64]), None);

    let recomputed = *cache.get_or_set(first, cache_args![1_i64], || 9_u32);
    assert_eq!(recomputed, 9);

    cache.clear();
    assert_eq!(cache.stats().current_size, 0);
}

#[test]
fn extra_store_keys_are_typed_and_distinct() {
    let spacing = ExtraKey::<f64>::new("spacing");
    let other_spacing = ExtraKey::<f64>::new("spacing");
    let label = ExtraKey::<String>::new("label");

    let mut store = ExtraStore::new();
    assert!(store.is_empty());
    store.set(&spacing, 4.0);
    store.set(&label, "volume".to_owned());

    assert_eq!(store.get(&spacing), Some(&4.0));
    assert_eq!(store.get(&other_spacing), None);
    assert_eq!(store.get(&label).map(String::as_str), Some("volume"));
    assert!(store.contains(&label));
    assert_eq!(store.len(), 2);

    assert!(store.remove(&label));
    assert!(!store.remove(&label));
    assert_eq!(spacing.name(), "spacing");
}

#[test]
fn extra_store_clones_are_copy_on_write() {
    let key = ExtraKey::<u32>::new("count");
    let mut original = ExtraStore::new();
    original.set(&key, 1);

    let mut copy = original.clone();
    copy.set(&key, 2);
    assert_eq!(original.get(&key), Some(&1));
    assert_eq!(copy.get(&key), Some(&2));
}

#[test]
fn extra_store_merge_prefers_incoming_values() {
    let shared = ExtraKey::<u32>::new("shared");
    let left_only = ExtraKey::<u32>::new("left");
    let right_only = ExtraKey::<u32>::new("right");

    let mut left = ExtraStore::new();
    left.set(&shared, 1);
    left.set(&left_only, 10);
    let mut right = ExtraStore::new();
    right.set(&shared, 2);
    right.set(&right_only, 20);

    let merged = left.merge(&right);
    assert_eq!(merged.get(&shared), Some(&2));
    assert_eq!(merged.get(&left_only), Some(&10));
    assert_eq!(merged.get(&right_only), Some(&20));
    assert_eq!(left.get(&shared), Some(&1));
    assert_eq!(left.len(), 2);
}
