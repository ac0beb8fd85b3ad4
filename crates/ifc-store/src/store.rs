//! The in-memory target repository.
//!
//! Objects, containers, and attachment relations live in flat arenas
//! addressed by opaque ids. Relations are the single source of truth
//! for which containers describe which objects; nothing in the arenas
//! points back at anything else.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ids::{ObjectId, SetId};
use crate::property::PropertySetDef;

/// A target object that containers can be attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfcObject {
    pub name: String,
}

/// Attachment relation: one container describing one or more objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelDefinesByProperties {
    pub set: SetId,
    pub objects: Vec<ObjectId>,
}

/// Arena-backed object store for exchanger output.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IfcStore {
    objects: Vec<IfcObject>,
    sets: Vec<PropertySetDef>,
    relations: Vec<RelDefinesByProperties>,
}

impl IfcStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new object and returns its handle.
    pub fn add_object(&mut self, name: impl Into<String>) -> ObjectId {
        let id = ObjectId::new(self.objects.len());
        self.objects.push(IfcObject { name: name.into() });
        id
    }

    pub fn object(&self, id: ObjectId) -> Result<&IfcObject, StoreError> {
        self.objects
            .get(id.index())
            .ok_or(StoreError::UnknownObject(id))
    }

    /// Creates a new container and returns its handle. The container
    /// describes nothing until it is related to an object.
    pub fn add_set(&mut self, set: PropertySetDef) -> SetId {
        let id = SetId::new(self.sets.len());
        self.sets.push(set);
        id
    }

    pub fn set(&self, id: SetId) -> Result<&PropertySetDef, StoreError> {
        self.sets.get(id.index()).ok_or(StoreError::UnknownSet(id))
    }

    pub fn set_mut(&mut self, id: SetId) -> Result<&mut PropertySetDef, StoreError> {
        self.sets
            .get_mut(id.index())
            .ok_or(StoreError::UnknownSet(id))
    }

    /// Records that `set` describes `object`. Reuses the set's existing
    /// relation record when there is one; relating the same pair twice
    /// is a no-op.
    pub fn relate(&mut self, set: SetId, object: ObjectId) -> Result<(), StoreError> {
        if set.index() >= self.sets.len() {
            return Err(StoreError::UnknownSet(set));
        }
        if object.index() >= self.objects.len() {
            return Err(StoreError::UnknownObject(object));
        }
        if let Some(rel) = self.relations.iter_mut().find(|rel| rel.set == set) {
            if !rel.objects.contains(&object) {
                rel.objects.push(object);
            }
        } else {
            self.relations.push(RelDefinesByProperties {
                set,
                objects: vec![object],
            });
        }
        Ok(())
    }

    pub fn relations(&self) -> &[RelDefinesByProperties] {
        &self.relations
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// All containers with their handles, in creation order.
    pub fn sets(&self) -> impl Iterator<Item = (SetId, &PropertySetDef)> {
        self.sets
            .iter()
            .enumerate()
            .map(|(index, set)| (SetId::new(index), set))
    }

    /// Read-through view of the element-quantity subset of the
    /// container arena. No second copy is materialized.
    pub fn element_quantities(&self) -> impl Iterator<Item = (SetId, &PropertySetDef)> {
        self.sets().filter(|(_, set)| set.is_quantity_set())
    }

    /// Read-through view of the generic property-set subset.
    pub fn property_sets(&self) -> impl Iterator<Item = (SetId, &PropertySetDef)> {
        self.sets().filter(|(_, set)| !set.is_quantity_set())
    }

    /// Containers attached to `object`, in relation order.
    pub fn sets_for(&self, object: ObjectId) -> impl Iterator<Item = (SetId, &PropertySetDef)> {
        self.relations
            .iter()
            .filter(move |rel| rel.objects.contains(&object))
            .filter_map(|rel| self.sets.get(rel.set.index()).map(|set| (rel.set, set)))
    }
}
