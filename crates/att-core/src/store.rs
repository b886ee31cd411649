//! Snapshot persistence contract.

use crate::snapshot::Snapshot;

/// Loads and saves the whole [`Snapshot`].
///
/// Failures are not surfaced: a missing or unreadable snapshot loads as
/// `None`, and implementations log save failures themselves.
pub trait StateStore {
    fn load(&self) -> Option<Snapshot>;
    fn save(&mut self, snapshot: &Snapshot);
}

/// Returns the stored snapshot, or the default seed when there is none.
pub fn load_or_seed<S: StateStore + ?Sized>(store: &S) -> Snapshot {
    store.load().unwrap_or_else(|| {
        tracing::debug!("no stored snapshot, using seed");
        Snapshot::seed()
    })
}

/// Keeps the serialized snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding arbitrary bytes, e.g. a corrupt blob.
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        let blob = self.blob.as_deref()?;
        serde_json::from_slice(blob)
            .inspect_err(|e| tracing::warn!(error = %e, "stored snapshot is malformed"))
            .ok()
    }

    fn save(&mut self, snapshot: &Snapshot) {
        match serde_json::to_vec(snapshot) {
            Ok(blob) => self.blob = Some(blob),
            Err(e) => tracing::error!(error = %e, "failed to serialize snapshot"),
        }
    }
}
