use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of one issued request. Increases monotonically per orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u64);

impl SlotId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse state of a slot, independent of its payload type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlotState<T> {
    Pending,
    Ready(T),
    /// Human-readable failure message
    Failed(String),
}

/// The result holder for one request of one kind for one selection.
///
/// Created `Pending` when the request is issued and settled at most once.
/// A newer request gets a new slot; an existing slot is never reused.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchSlot<T> {
    id: SlotId,
    state: SlotState<T>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> FetchSlot<T> {
    pub fn pending(id: SlotId) -> Self {
        Self {
            id,
            state: SlotState::Pending,
            fetched_at: None,
        }
    }

    pub fn ready(id: SlotId, value: T) -> Self {
        Self {
            id,
            state: SlotState::Ready(value),
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn failed(id: SlotId, message: impl Into<String>) -> Self {
        Self {
            id,
            state: SlotState::Failed(message.into()),
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Pending => SlotStatus::Pending,
            SlotState::Ready(_) => SlotStatus::Ready,
            SlotState::Failed(_) => SlotStatus::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            SlotState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SlotState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// When the slot settled; `None` while pending.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}
