//! Child ID generation.

use std::cell::Cell;

use uuid::Uuid;

use crate::types::ChildId;

/// Produces fresh, collision-resistant child IDs.
pub trait IdGenerator {
    fn next_id(&self) -> ChildId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> ChildId {
        ChildId::from_uuid(Uuid::new_v4())
    }
}

/// Deterministic `{prefix}{n}` identifiers starting at 1 (`k1`, `k2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> ChildId {
        let n = self.next.get();
        self.next.set(n + 1);
        ChildId::from_sequence(&self.prefix, n)
    }
}

impl ChildId {
    fn from_uuid(uuid: Uuid) -> Self {
        // A hyphenated UUID is never empty
        Self::new(uuid.to_string()).unwrap_or_else(|_| unreachable!())
    }

    fn from_sequence(prefix: &str, n: u64) -> Self {
        // The counter suffix keeps the ID non-empty even with an empty prefix
        Self::new(format!("{prefix}{n}")).unwrap_or_else(|_| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_from_one() {
        let ids = SequentialIds::new("k");
        assert_eq!(ids.next_id().as_str(), "k1");
        assert_eq!(ids.next_id().as_str(), "k2");
        assert_eq!(ids.next_id().as_str(), "k3");
    }

    #[test]
    fn uuid_ids_are_unique_uuids() {
        let a = UuidIds.next_id();
        let b = UuidIds.next_id();
        assert_ne!(a, b);
        Uuid::parse_str(a.as_str()).unwrap();
    }
}
