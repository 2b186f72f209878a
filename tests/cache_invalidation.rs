//! Property-based checks of the read-through / invalidation contract.

mod common;

use std::sync::Arc;

use common::PausedListRepository;
use proptest::prelude::*;
use property_cache::{
    cache::{CacheBackend, CacheKey, MemoryBackend},
    models::{NewProperty, Price},
    store::MemoryRepository,
    PropertyService,
};

fn service_with_backend() -> (PropertyService, MemoryBackend) {
    let backend = MemoryBackend::new(100);
    let service = PropertyService::new(
        Arc::new(MemoryRepository::new()),
        Arc::new(backend.clone()),
        CacheKey::all_properties(None),
        3600,
    );
    (service, backend)
}

async fn snapshot_present(backend: &MemoryBackend) -> bool {
    backend.store().read().await.len() == 1
}

#[derive(Debug, Clone)]
enum Step {
    Create { title: String, cents: i64 },
    Read,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        ("[A-Z][a-z]{2,12}", 0i64..1_000_000_000)
            .prop_map(|(title, cents)| Step::Create { title, cents }),
        Just(Step::Read),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Immediately after every create the snapshot is gone; the next read
    /// repopulates it with a collection that includes the new record.
    #[test]
    fn prop_create_always_clears_snapshot(steps in prop::collection::vec(step_strategy(), 1..25)) {
        tokio_test::block_on(async {
            let (service, backend) = service_with_backend();
            let mut expected = 0usize;

            for step in steps {
                match step {
                    Step::Create { title, cents } => {
                        service
                            .create(NewProperty::new(title, "", Price::from_cents(cents), "Harbor"))
                            .await
                            .unwrap();
                        expected += 1;
                        prop_assert!(!snapshot_present(&backend).await);
                    }
                    Step::Read => {
                        let all = service.get_all_properties().await.unwrap();
                        prop_assert_eq!(all.len(), expected);
                        prop_assert!(snapshot_present(&backend).await);
                    }
                }
            }
            Ok(())
        })?;
    }

    /// Two reads with no write in between return byte-identical data and
    /// the second is a cache hit.
    #[test]
    fn prop_repeated_reads_are_identical(count in 0usize..8) {
        tokio_test::block_on(async {
            let (service, backend) = service_with_backend();
            for i in 0..count {
                service
                    .create(NewProperty::new(format!("Listing {i}"), "", Price::from_cents(i as i64), "Uptown"))
                    .await
                    .unwrap();
            }

            let first = serde_json::to_vec(&service.get_all_properties().await.unwrap()).unwrap();
            let hits_before = backend.info().await.unwrap().keyspace_hits;
            let second = serde_json::to_vec(&service.get_all_properties().await.unwrap()).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(backend.info().await.unwrap().keyspace_hits, hits_before + 1);
            Ok(())
        })?;
    }
}

#[tokio::test]
async fn test_invalidation_property_scenario() {
    let (service, backend) = service_with_backend();
    service.get_all_properties().await.unwrap();
    let before = service.count().await.unwrap();

    service
        .create(NewProperty::new(
            "Test Cache Invalidation Property",
            "This property is used to test if the cache gets invalidated when a new property is added.",
            "999999.99".parse().unwrap(),
            "Test Location",
        ))
        .await
        .unwrap();

    assert_eq!(service.count().await.unwrap(), before + 1);
    assert_eq!(backend.get("all_properties").await.unwrap(), None);
}

#[tokio::test]
async fn test_prefixed_namespace_is_invalidated() {
    let backend = MemoryBackend::new(100);
    let service = PropertyService::new(
        Arc::new(MemoryRepository::new()),
        Arc::new(backend.clone()),
        CacheKey::all_properties(Some("listings")),
        3600,
    );

    service.get_all_properties().await.unwrap();
    assert!(backend.get("listings:all_properties").await.unwrap().is_some());

    service
        .create(NewProperty::new("Loft", "", Price::from_cents(1), "Harbor"))
        .await
        .unwrap();
    assert!(backend.get("listings:all_properties").await.unwrap().is_none());
}

#[tokio::test]
async fn test_load_overlapping_a_write_is_not_cached() {
    let repo = Arc::new(PausedListRepository::armed());
    let backend = MemoryBackend::new(100);
    let service = PropertyService::new(
        repo.clone(),
        Arc::new(backend.clone()),
        CacheKey::all_properties(None),
        3600,
    );

    let reader = tokio::spawn({
        let service = service.clone();
        async move { service.get_all_properties().await }
    });
    repo.loading.notified().await;

    // The rows are already read; a write commits before the reader stores them
    service
        .create(NewProperty::new("Loft", "", Price::from_cents(1), "Harbor"))
        .await
        .unwrap();
    repo.release.notify_one();

    let loaded = reader.await.unwrap().unwrap();
    assert!(loaded.is_empty());
    assert!(!snapshot_present(&backend).await);

    let fresh = service.get_all_properties().await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert!(snapshot_present(&backend).await);
}
