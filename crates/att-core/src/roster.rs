//! Roster editing.
//!
//! Invalid input and unknown IDs leave the snapshot unchanged; the caller is
//! expected to validate and report problems to the operator first.

use crate::child::{Child, ChildFields};
use crate::id::IdGenerator;
use crate::snapshot::Snapshot;
use crate::types::ChildId;

impl Snapshot {
    /// Appends a new active child with a fresh ID.
    #[must_use]
    pub fn add_child(&self, fields: &ChildFields, ids: &impl IdGenerator) -> Self {
        let fields = match fields.validate() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(error = %e, "add_child declined");
                return self.clone();
            }
        };

        let child = Child::new(ids.next_id(), fields);
        tracing::debug!(child = %child.id, "child added");
        let mut next = self.clone();
        next.children.push(child);
        next
    }

    /// Replaces a child's editable fields, keeping ID and active flag.
    #[must_use]
    pub fn update_child(&self, id: &ChildId, fields: &ChildFields) -> Self {
        let fields = match fields.validate() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(child = %id, error = %e, "update_child declined");
                return self.clone();
            }
        };
        self.edit_child(id, |child| child.apply(fields))
    }

    /// Archives (`false`) or restores (`true`) a child.
    #[must_use]
    pub fn set_active(&self, id: &ChildId, active: bool) -> Self {
        self.edit_child(id, |child| child.is_active = active)
    }

    fn edit_child(&self, id: &ChildId, edit: impl FnOnce(&mut Child)) -> Self {
        let mut next = self.clone();
        match next.children.iter_mut().find(|c| &c.id == id) {
            Some(child) => edit(child),
            None => tracing::debug!(child = %id, "unknown child, roster unchanged"),
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    fn fields(first: &str) -> ChildFields {
        ChildFields::new(first, "Hopper", "Walter")
    }

    #[test]
    fn add_child_assigns_fresh_ids_in_order() {
        let ids = SequentialIds::new("k");
        let s = Snapshot::seed()
            .add_child(&fields("Grace"), &ids)
            .add_child(&fields("Ada").with_allergies("eggs"), &ids);

        assert_eq!(s.children.len(), 2);
        assert_eq!(s.children[0].id.as_str(), "k1");
        assert_eq!(s.children[1].id.as_str(), "k2");
        assert_eq!(s.children[1].allergies.as_deref(), Some("eggs"));
        assert!(s.children.iter().all(|c| c.is_active));
    }

    #[test]
    fn add_child_with_blank_field_is_noop() {
        let ids = SequentialIds::new("k");
        let s = Snapshot::seed().add_child(&ChildFields::new("Grace", "Hopper", " "), &ids);
        assert!(s.children.is_empty());
        // No ID was consumed by the rejected entry
        assert_eq!(ids.next_id().as_str(), "k1");
    }

    #[test]
    fn update_child_preserves_identity_and_active_flag() {
        let ids = SequentialIds::new("k");
        let s = Snapshot::seed().add_child(&fields("Grace"), &ids);
        let id = s.children[0].id.clone();
        let s = s.set_active(&id, false);

        let updated = s.update_child(&id, &ChildFields::new("Grace", "Murray", "Mary"));
        let child = updated.child(&id).unwrap();
        assert_eq!(child.last_name, "Murray");
        assert_eq!(child.guardian, "Mary");
        assert!(!child.is_active);
    }

    #[test]
    fn update_child_rejects_invalid_or_unknown() {
        let ids = SequentialIds::new("k");
        let s = Snapshot::seed().add_child(&fields("Grace"), &ids);
        let id = s.children[0].id.clone();

        assert_eq!(s.update_child(&id, &ChildFields::new("", "Hopper", "Walter")), s);
        assert_eq!(
            s.update_child(&ChildId::new("nobody").unwrap(), &fields("Ada")),
            s
        );
    }

    #[test]
    fn archived_children_leave_the_active_list() {
        let ids = SequentialIds::new("k");
        let s = Snapshot::seed()
            .add_child(&fields("Grace"), &ids)
            .add_child(&fields("Ada"), &ids);
        let s = s.set_active(&ChildId::new("k1").unwrap(), false);

        let active: Vec<&str> = s.active_children().map(|c| c.first_name.as_str()).collect();
        assert_eq!(active, ["Ada"]);
        assert_eq!(s.children.len(), 2);

        let restored = s.set_active(&ChildId::new("k1").unwrap(), true);
        assert_eq!(restored.active_children().count(), 2);
    }
}
