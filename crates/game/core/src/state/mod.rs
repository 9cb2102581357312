//! Local mirror of the server's world.
//!
//! [`WorldState`] owns the object table exclusively. The runtime's
//! synchronizers are the only writers; decision logic receives `&WorldState`
//! for the duration of one turn.
pub mod bounds;
pub mod object;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub use bounds::MapBounds;
pub use object::{ObjectId, ObjectKind, ObjectRecord};

use crate::error::BoundsError;

/// Tank identifiers assigned by the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TankIdentity {
    /// This client's tank.
    pub own: ObjectId,
    /// The opponent's tank.
    pub enemy: ObjectId,
}

impl TankIdentity {
    pub fn new(own: impl Into<ObjectId>, enemy: impl Into<ObjectId>) -> Self {
        Self {
            own: own.into(),
            enemy: enemy.into(),
        }
    }
}

/// Outcome of an upsert batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeCount {
    /// Identifiers not previously in the table.
    pub created: usize,
    /// Identifiers whose record was replaced.
    pub replaced: usize,
}

impl MergeCount {
    pub const fn total(&self) -> usize {
        self.created + self.replaced
    }
}

/// Outcome of a deletion batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemovalCount {
    /// Identifiers that were present and are now gone.
    pub removed: usize,
    /// Identifiers that were not in the table (no-op).
    pub missing: usize,
}

/// Canonical client-side world state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldState {
    /// Set once by the handshake and never modified.
    identity: TankIdentity,
    /// Latest version of every live object, keyed by server identifier.
    objects: BTreeMap<ObjectId, ObjectRecord>,
    /// Derived from boundary geometry once initialization completes.
    bounds: MapBounds,
}

impl WorldState {
    /// Creates an empty world for the given tanks.
    pub fn new(identity: TankIdentity) -> Self {
        Self {
            identity,
            objects: BTreeMap::new(),
            bounds: MapBounds::default(),
        }
    }

    pub fn identity(&self) -> &TankIdentity {
        &self.identity
    }

    pub fn own_tank_id(&self) -> &str {
        &self.identity.own
    }

    pub fn enemy_tank_id(&self) -> &str {
        &self.identity.enemy
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn width(&self) -> f64 {
        self.bounds.width
    }

    pub fn height(&self) -> f64 {
        self.bounds.height
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn object(&self, id: &str) -> Option<&ObjectRecord> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Our tank's latest record, if it is still in the table.
    pub fn own_tank(&self) -> Option<&ObjectRecord> {
        self.object(&self.identity.own)
    }

    /// The opponent's latest record, if it is still in the table.
    pub fn enemy_tank(&self) -> Option<&ObjectRecord> {
        self.object(&self.identity.enemy)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &ObjectRecord)> {
        self.objects.iter()
    }

    pub fn objects_of_kind(
        &self,
        kind: ObjectKind,
    ) -> impl Iterator<Item = (&ObjectId, &ObjectRecord)> {
        self.objects.iter().filter(move |(_, record)| record.is(kind))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Inserts or wholly replaces one record. Returns the previous version.
    pub fn upsert(&mut self, id: impl Into<ObjectId>, record: ObjectRecord) -> Option<ObjectRecord> {
        self.objects.insert(id.into(), record)
    }

    /// Removes one record. Absent identifiers are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<ObjectRecord> {
        self.objects.remove(id)
    }

    /// Upserts every entry of an `updated_objects` map.
    ///
    /// Values are moved into the table, so the caller's message no longer
    /// aliases any stored record.
    pub fn merge_updates(&mut self, updates: Map<String, Value>) -> MergeCount {
        let mut count = MergeCount::default();
        for (id, value) in updates {
            match self.upsert(id, ObjectRecord::new(value)) {
                Some(_) => count.replaced += 1,
                None => count.created += 1,
            }
        }
        count
    }

    /// Removes every listed identifier, ignoring ones not in the table.
    pub fn remove_all<'a, I>(&mut self, ids: I) -> RemovalCount
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut count = RemovalCount::default();
        for id in ids {
            match self.remove(id) {
                Some(_) => count.removed += 1,
                None => count.missing += 1,
            }
        }
        count
    }

    /// Recomputes the map bounds from the current boundary objects.
    ///
    /// On error the previous bounds are left untouched.
    pub fn derive_bounds(&mut self) -> Result<MapBounds, BoundsError> {
        let bounds = MapBounds::derive(&self.objects)?;
        self.bounds = bounds;
        Ok(bounds)
    }
}
