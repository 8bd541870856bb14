//! Collision detection algorithms.
//!
//! This module holds the conflict-detection engine for class schedules.
//!
//! # Components
//!
//! - [`overlap`]: Half-open slot interval predicate
//! - [`conflict_index`]: Per-key `(resource, day)` partitions built while scanning
//! - [`classifier`]: Collision type, level and size for an overlapping pair
//! - [`collector`]: Ordered collision sequence and back-annotation
//! - [`detector`]: One scan over both indexes under a [`CollisionPolicy`]
//!
//! # Example
//!
//! ```
//! use class_collisions::algorithms::{CollisionDetector, CollisionPolicy};
//! use class_collisions::core::domain::{DayId, RoomId, SessionRecord, SlotInterval, TeacherId};
//!
//! let mut records = vec![
//!     SessionRecord::new(1, TeacherId(1), RoomId(1), DayId(1), SlotInterval::new(0, 2).unwrap()),
//!     SessionRecord::new(2, TeacherId(2), RoomId(1), DayId(1), SlotInterval::new(2, 4).unwrap()),
//! ];
//! let collisions = CollisionDetector::new(CollisionPolicy::Merged).detect_and_annotate(&mut records);
//! assert!(collisions.is_empty());
//! ```

pub mod classifier;
pub mod collector;
pub mod conflict_index;
pub mod detector;
pub mod overlap;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::{classify, classify_as};
pub use collector::{back_annotate, Collision, CollisionCollector};
pub use conflict_index::{detect, ConflictIndex, IndexStrategy, PartitionKey};
pub use detector::{CollisionDetector, CollisionPolicy};
pub use overlap::overlaps;
