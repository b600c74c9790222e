//! Fetch rounds and their result slots.
//!
//! - [`slot`] - `FetchSlot<T>`, the per-request result holder
//! - [`orchestrator`] - `FetchOrchestrator`, which issues requests and
//!   settles slots in the cache
//!
//! # Discarding late arrivals
//!
//! Every request gets a fresh [`SlotId`]. The orchestrator remembers the
//! latest id per (selection, kind) and only applies a completion whose id is
//! still the latest. The cache key includes the selection, so a late answer
//! for one selection can never land in another's entry.

mod orchestrator;
mod slot;

pub use orchestrator::{ApplyOutcome, FetchCompletion, FetchOrchestrator, FetchOutcome};
pub use slot::{FetchSlot, SlotId, SlotState, SlotStatus};
