//! Placing operations into path items.

use std::sync::Arc;

use indexmap::map::Entry;

use crate::types::{HttpMethod, MethodSpec, NamedPathItem, Operation, PathItem, Paths};

/// Build a path item holding `operation` in the slot(s) for `method`.
///
/// `MethodSpec::Any` puts the same operation in all seven slots.
pub fn assemble(method: MethodSpec, path: impl Into<String>, operation: Operation) -> NamedPathItem {
    let operation = Arc::new(operation);
    let mut value = PathItem::default();

    for m in method.methods() {
        *value.slot_mut(*m) = Some(Arc::clone(&operation));
    }

    NamedPathItem {
        name: path.into(),
        value,
    }
}

impl PathItem {
    /// Move `other`'s operations into empty slots.
    ///
    /// Returns the verbs that were already taken; those operations of `other` are dropped.
    pub fn merge(&mut self, mut other: PathItem) -> Vec<HttpMethod> {
        let mut taken = Vec::new();

        for m in HttpMethod::ALL {
            let Some(op) = other.slot_mut(m).take() else {
                continue;
            };
            let slot = self.slot_mut(m);
            if slot.is_some() {
                taken.push(m);
            } else {
                *slot = Some(op);
            }
        }

        taken
    }
}

impl Paths {
    /// Add a path item, merging it into an existing item for the same template.
    ///
    /// Returns the verbs whose slots were already taken.
    pub fn insert(&mut self, item: NamedPathItem) -> Vec<HttpMethod> {
        match self.items.entry(item.name) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(item.value),
            Entry::Vacant(slot) => {
                slot.insert(item.value);
                Vec::new()
            }
        }
    }
}
