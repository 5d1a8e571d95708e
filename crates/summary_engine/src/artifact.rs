use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

/// Handle to a generated document held by an [`ArtifactStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(pub u64);

/// In-memory home of generated documents between generation and download.
///
/// Cloning is cheap and every clone sees the same artifacts. Nothing is
/// evicted on its own: callers release what they no longer need.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    artifacts: HashMap<ArtifactId, Bytes>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, content: Bytes) -> ArtifactId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = ArtifactId(inner.next_id);
        inner.artifacts.insert(id, content);
        id
    }

    pub fn get(&self, id: ArtifactId) -> Option<Bytes> {
        self.lock().artifacts.get(&id).cloned()
    }

    /// Returns false if `id` was never acquired or is already released.
    pub fn release(&self, id: ArtifactId) -> bool {
        self.lock().artifacts.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().artifacts.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.lock()
            .artifacts
            .values()
            .map(|content| content.len() as u64)
            .sum()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
