//! Core domain models for class schedules.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing session records, slot intervals, and collision annotations.

pub mod domain;

pub use domain::{
    CollisionAnnotation, CollisionLevel, CollisionType, DayId, RoomId, SessionDetails, SessionId,
    SessionRecord, SlotInterval, TeacherId, MAX_SLOT, SLOT_MINUTES,
};
