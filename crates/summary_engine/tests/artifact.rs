use bytes::Bytes;
use summary_engine::{ArtifactId, ArtifactStore};

#[test]
fn acquire_hands_out_fresh_ids_shared_across_clones() {
    let store = ArtifactStore::new();
    let view = store.clone();

    let a = store.acquire(Bytes::from_static(b"first"));
    let b = store.acquire(Bytes::from_static(b"second!"));

    assert_ne!(a, b);
    assert_eq!(view.len(), 2);
    assert_eq!(view.total_bytes(), 12);
    assert_eq!(view.get(a), Some(Bytes::from_static(b"first")));
}

#[test]
fn release_frees_content_once() {
    let store = ArtifactStore::new();
    let id = store.acquire(Bytes::from_static(b"doc"));

    assert!(store.release(id));
    assert!(!store.release(id));
    assert!(store.get(id).is_none());
    assert!(store.is_empty());
    assert_eq!(store.total_bytes(), 0);

    assert!(!store.release(ArtifactId(999)));
    // Ids are not recycled after release.
    assert_ne!(store.acquire(Bytes::new()), id);
}
