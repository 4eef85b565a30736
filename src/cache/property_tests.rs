//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key composition, manager read/write/evict
//! semantics, TTL boundaries and store capacity.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::cache::{CacheKey, CacheManager, FragmentStore, StandardStore, Ttl};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 10_000;
const T0: u64 = 1_700_000_000_000;

type Nodes = Vec<String>;

// == Strategies ==
/// Identity segments, underscores included so locale-like values show up
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{0,8}".prop_map(|s| s)
}

fn triple_strategy() -> impl Strategy<Value = (String, String, String)> {
    (
        "(nav|navigation|footer|header)[a-z]{0,2}",
        "(HTML|XML|TEXT)",
        "(en_US|fr_FR|de|)",
    )
}

fn nodes_strategy() -> impl Strategy<Value = Nodes> {
    prop::collection::vec("<[a-z]{1,6}/>", 0..4)
}

fn manager() -> CacheManager<Nodes> {
    CacheManager::new(|| StandardStore::new(16, TEST_MAX_ENTRIES))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Identical triples compose identical keys; distinct triples never collide.
    #[test]
    fn prop_key_composition_injective(
        a in (segment_strategy(), segment_strategy(), segment_strategy()),
        b in (segment_strategy(), segment_strategy(), segment_strategy()),
    ) {
        let key_a = CacheKey::compose(&a.0, &a.1, &a.2);
        let key_b = CacheKey::compose(&b.0, &b.1, &b.2);
        prop_assert_eq!(key_a == key_b, a == b);
    }

    // A get with no TTL returns exactly what was last put for that triple,
    // however many other triples were written.
    #[test]
    fn prop_get_returns_last_put(
        writes in prop::collection::vec((triple_strategy(), nodes_strategy()), 1..40)
    ) {
        let manager = manager();
        let mut expected: HashMap<(String, String, String), Nodes> = HashMap::new();

        for ((name, mode, locale), nodes) in writes {
            manager.put(&name, &mode, &locale, nodes.clone()).unwrap();
            expected.insert((name, mode, locale), nodes);
        }

        for ((name, mode, locale), nodes) in &expected {
            let cached = manager.get(name, mode, locale, Ttl::Never).unwrap();
            prop_assert_eq!(cached.as_ref(), Some(nodes));
        }
    }

    // Evicting one triple leaves every other triple in place.
    #[test]
    fn prop_evict_is_exact(
        triples in prop::collection::hash_set(triple_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let manager = manager();
        let triples: Vec<_> = triples.into_iter().collect();
        for (name, mode, locale) in &triples {
            manager.put(name, mode, locale, vec![name.clone()]).unwrap();
        }

        let victim = pick.get(&triples).clone();
        manager.evict(&victim.0, &victim.1, &victim.2).unwrap();

        for triple in &triples {
            let cached = manager.get(&triple.0, &triple.1, &triple.2, Ttl::Never).unwrap();
            prop_assert_eq!(cached.is_none(), *triple == victim);
        }
    }

    // Prefix eviction removes exactly the keys whose text starts with the prefix.
    #[test]
    fn prop_evict_by_starts_with_matches_text(
        triples in prop::collection::hash_set(triple_strategy(), 1..20),
        prefix in "(nav|navigation|foot|header|x|)",
    ) {
        let manager = manager();
        for (name, mode, locale) in &triples {
            manager.put(name, mode, locale, vec![name.clone()]).unwrap();
        }

        let expected_removed = triples
            .iter()
            .filter(|(n, m, l)| CacheKey::compose(n, m, l).as_str().starts_with(&prefix))
            .count();

        prop_assert_eq!(manager.evict_by_starts_with(&prefix).unwrap(), expected_removed);

        for (name, mode, locale) in &triples {
            let matched = CacheKey::compose(name, mode, locale).as_str().starts_with(&prefix);
            let cached = manager.get(name, mode, locale, Ttl::Never).unwrap();
            prop_assert_eq!(cached.is_none(), matched);
        }
    }

    // Name eviction never touches caches whose name merely shares a prefix.
    #[test]
    fn prop_evict_by_name_is_anchored(
        triples in prop::collection::hash_set(triple_strategy(), 1..20),
        name in "(nav|navigation|footer)",
    ) {
        let manager = manager();
        for (n, m, l) in &triples {
            manager.put(n, m, l, vec![n.clone()]).unwrap();
        }

        manager.evict_by_name(&name).unwrap();

        for (n, m, l) in &triples {
            let cached = manager.get(n, m, l, Ttl::Never).unwrap();
            prop_assert_eq!(cached.is_none(), *n == name);
        }
    }

    // An entry put at t0 is served at t0 + T - 1s and absent at t0 + T + 1s.
    #[test]
    fn prop_ttl_boundary(ttl_secs in 1i64..100_000) {
        let now = Arc::new(AtomicU64::new(T0));
        let clock_now = now.clone();
        let manager: CacheManager<Nodes> = CacheManager::new(move || {
            let clock_now = clock_now.clone();
            StandardStore::new(16, TEST_MAX_ENTRIES)
                .with_clock(Arc::new(move || clock_now.load(Ordering::SeqCst)))
        });

        manager.put("nav", "HTML", "en_US", vec!["<ul/>".to_string()]).unwrap();
        let elapsed_ms = |secs: i64| T0 + (secs as u64) * 1000;

        now.store(elapsed_ms(ttl_secs - 1), Ordering::SeqCst);
        prop_assert!(manager.get("nav", "HTML", "en_US", ttl_secs).unwrap().is_some());

        now.store(elapsed_ms(ttl_secs + 1), Ordering::SeqCst);
        prop_assert!(manager.get("nav", "HTML", "en_US", ttl_secs).unwrap().is_none());
    }

    // Without a TTL, age never matters.
    #[test]
    fn prop_no_ttl_ignores_age(age_secs in 0u64..10_000_000) {
        let now = Arc::new(AtomicU64::new(T0));
        let clock_now = now.clone();
        let store: StandardStore<Nodes> = StandardStore::new(16, TEST_MAX_ENTRIES)
            .with_clock(Arc::new(move || clock_now.load(Ordering::SeqCst)));

        store.put("k", vec!["v".to_string()]).unwrap();
        now.store(T0 + age_secs * 1000, Ordering::SeqCst);

        prop_assert!(store.get("k").unwrap().is_some());
    }

    // The standard store never holds more than its configured maximum.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec("[a-z]{1,6}", 1..200),
        max_entries in 1usize..50,
    ) {
        let store: StandardStore<Nodes> = StandardStore::new(10, max_entries);

        for key in keys {
            store.put(&key, Vec::new()).unwrap();
            prop_assert!(store.len() <= max_entries);
        }
    }
}

// == Property Test for Error Response Format ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Every error becomes a JSON body with a string "error" field.
    #[test]
    fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}") {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let error_variants = vec![
            CacheError::InvalidKey(error_msg.clone()),
            CacheError::CacheFull(error_msg.clone()),
            CacheError::InvalidRequest(error_msg.clone()),
            CacheError::NotFound(error_msg.clone()),
            CacheError::Internal(error_msg.clone()),
        ];

        let rt = tokio::runtime::Runtime::new().unwrap();
        for error in error_variants {
            let expected_msg = error.to_string();
            let response = error.into_response();

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok());
            prop_assert!(content_type.map(|ct| ct.contains("application/json")).unwrap_or(false));

            let bytes = rt.block_on(async { to_bytes(response.into_body(), usize::MAX).await.unwrap() });
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

            prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
        }
    }
}
