//! Collision accumulation and back-annotation onto the record store.

use serde::{Deserialize, Serialize};

use crate::core::domain::{CollisionAnnotation, CollisionLevel, CollisionType, SessionRecord};

/// A conflict between two sessions of the same batch.
///
/// `first` and `second` are positions in the record store, `first` being the
/// earlier one in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub first: usize,
    pub second: usize,
    pub annotation: CollisionAnnotation,
}

impl Collision {
    pub fn new(first: usize, second: usize, annotation: CollisionAnnotation) -> Self {
        debug_assert_ne!(first, second, "a session cannot collide with itself");
        Self {
            first,
            second,
            annotation,
        }
    }

    pub fn collision_type(&self) -> CollisionType {
        self.annotation.collision_type
    }

    pub fn level(&self) -> CollisionLevel {
        self.annotation.level
    }

    pub fn size_minutes(&self) -> u32 {
        self.annotation.size_minutes
    }

    pub fn involves(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }
}

/// Collisions in the order they were detected. Nothing is deduplicated.
#[derive(Debug, Clone, Default)]
pub struct CollisionCollector {
    collisions: Vec<Collision>,
}

impl CollisionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, collision: Collision) {
        self.collisions.push(collision);
    }

    pub fn len(&self) -> usize {
        self.collisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn into_collisions(self) -> Vec<Collision> {
        self.collisions
    }

    /// Writes every collected collision onto its two participants.
    pub fn annotate(&self, records: &mut [SessionRecord]) {
        back_annotate(records, &self.collisions);
    }
}

/// Overwrites both participants' annotation for each collision, in order.
///
/// A session involved in several collisions ends up carrying the last one;
/// the collision sequence remains the complete history.
pub fn back_annotate(records: &mut [SessionRecord], collisions: &[Collision]) {
    for collision in collisions {
        records[collision.first].annotation = collision.annotation;
        records[collision.second].annotation = collision.annotation;
    }
}
