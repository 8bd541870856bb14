//! Key-partitioned conflict index.
//!
//! Sessions are bucketed by `(resource, day)` in arrival order. Probing a new
//! session only touches the bucket it would land in, and every earlier session
//! in that bucket is tested, so a session that overlaps several earlier ones
//! reports all of them.

use std::collections::HashMap;

use crate::core::domain::{CollisionType, DayId, SessionRecord};

/// Which resource an index partitions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexStrategy {
    ByTeacher,
    ByRoom,
}

/// Bucket key of a [`ConflictIndex`]: the resource id plus the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    pub resource: i64,
    pub day: DayId,
}

impl IndexStrategy {
    pub const ALL: [IndexStrategy; 2] = [IndexStrategy::ByTeacher, IndexStrategy::ByRoom];

    pub fn partition_key(self, record: &SessionRecord) -> PartitionKey {
        let resource = match self {
            IndexStrategy::ByTeacher => record.teacher.0,
            IndexStrategy::ByRoom => record.room.0,
        };
        PartitionKey {
            resource,
            day: record.day,
        }
    }

    /// Same resource, same day and overlapping slots.
    pub fn collides(self, a: &SessionRecord, b: &SessionRecord) -> bool {
        self.partition_key(a) == self.partition_key(b) && a.slots.overlaps(&b.slots)
    }

    /// Collision type reported when only this resource is double-booked.
    pub fn collision_type(self) -> CollisionType {
        match self {
            IndexStrategy::ByTeacher => CollisionType::Teacher,
            IndexStrategy::ByRoom => CollisionType::Room,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexStrategy::ByTeacher => "teacher",
            IndexStrategy::ByRoom => "room",
        }
    }
}

/// Per-key bucket lists of record indices.
///
/// The index holds positions into a record store owned by the caller; the
/// same slice must be passed to every `probe` and `insert` call.
#[derive(Debug, Clone)]
pub struct ConflictIndex {
    strategy: IndexStrategy,
    buckets: HashMap<PartitionKey, Vec<usize>>,
    indexed: usize,
}

impl ConflictIndex {
    pub fn new(strategy: IndexStrategy) -> Self {
        Self {
            strategy,
            buckets: HashMap::new(),
            indexed: 0,
        }
    }

    pub fn strategy(&self) -> IndexStrategy {
        self.strategy
    }

    /// Number of records inserted so far.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }

    /// Number of distinct `(resource, day)` partitions seen so far.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns every indexed record that collides with `records[candidate]`,
    /// in arrival order. The candidate itself is never returned.
    pub fn probe(&self, records: &[SessionRecord], candidate: usize) -> Vec<usize> {
        let incoming = &records[candidate];
        let key = self.strategy.partition_key(incoming);

        match self.buckets.get(&key) {
            Some(bucket) => bucket
                .iter()
                .copied()
                .filter(|&earlier| earlier != candidate)
                .filter(|&earlier| self.strategy.collides(&records[earlier], incoming))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Adds `records[index]` to its partition.
    pub fn insert(&mut self, records: &[SessionRecord], index: usize) {
        let key = self.strategy.partition_key(&records[index]);
        self.buckets.entry(key).or_default().push(index);
        self.indexed += 1;
    }

    /// Probes for `records[index]` and then inserts it.
    pub fn probe_and_insert(&mut self, records: &[SessionRecord], index: usize) -> Vec<usize> {
        let hits = self.probe(records, index);
        self.insert(records, index);
        hits
    }
}

/// Finds every colliding pair under `strategy` in a single pass.
///
/// Pairs are `(earlier, later)` in input order, each reported once.
///
/// # Examples
///
/// ```
/// use class_collisions::algorithms::conflict_index::{detect, IndexStrategy};
/// use class_collisions::core::domain::{DayId, RoomId, SessionRecord, SlotInterval, TeacherId};
///
/// let records = vec![
///     SessionRecord::new(1, TeacherId(1), RoomId(10), DayId(1), SlotInterval::new(0, 4).unwrap()),
///     SessionRecord::new(2, TeacherId(1), RoomId(20), DayId(1), SlotInterval::new(2, 6).unwrap()),
/// ];
///
/// assert_eq!(detect(&records, IndexStrategy::ByTeacher), vec![(0, 1)]);
/// assert!(detect(&records, IndexStrategy::ByRoom).is_empty());
/// ```
pub fn detect(records: &[SessionRecord], strategy: IndexStrategy) -> Vec<(usize, usize)> {
    let mut index = ConflictIndex::new(strategy);
    let mut pairs = Vec::new();

    for current in 0..records.len() {
        for earlier in index.probe_and_insert(records, current) {
            pairs.push((earlier, current));
        }
    }

    pairs
}
