//! The event store collaborator.
//!
//! Persistence and realtime sync live in the hosted document database; this
//! trait is the slice of it the agenda needs. Creation only accepts a
//! [`ValidEvent`], so nothing malformed can be written through it.
//! [`MemoryEventStore`] (feature `memory-store`, on by default) backs tests
//! and the CLI.

#[cfg(feature = "memory-store")]
use std::collections::HashMap;

#[cfg(feature = "memory-store")]
use uuid::Uuid;

use crate::error::Result;
#[cfg(feature = "memory-store")]
use crate::error::AgendaError;
use crate::event::{Event, ValidEvent};

pub trait EventStore {
    /// Persist a new event for `user_id` and return it with its assigned id.
    fn create(&mut self, user_id: &str, event: ValidEvent) -> Result<Event>;

    /// Remove an event. Returns `false` if the user had no such event.
    fn delete(&mut self, user_id: &str, event_id: &str) -> Result<bool>;

    /// All of a user's events ordered by `(date, time)`.
    fn list(&self, user_id: &str) -> Result<Vec<Event>>;
}

/// In-process store with uuid v4 ids. Needs the `memory-store` feature.
#[cfg(feature = "memory-store")]
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    by_user: HashMap<String, Vec<Event>>,
}

#[cfg(feature = "memory-store")]
impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "memory-store")]
impl EventStore for MemoryEventStore {
    fn create(&mut self, user_id: &str, event: ValidEvent) -> Result<Event> {
        if user_id.is_empty() {
            return Err(AgendaError::Store("user id must not be empty".to_string()));
        }
        let event = event.into_event(Uuid::new_v4().to_string());
        tracing::debug!(user_id, event_id = %event.id, date = %event.date, "event created");
        self.by_user
            .entry(user_id.to_string())
            .or_default()
            .push(event.clone());
        Ok(event)
    }

    fn delete(&mut self, user_id: &str, event_id: &str) -> Result<bool> {
        let Some(events) = self.by_user.get_mut(user_id) else {
            return Ok(false);
        };
        let before = events.len();
        events.retain(|e| e.id != event_id);
        let removed = events.len() != before;
        if removed {
            tracing::debug!(user_id, event_id, "event deleted");
        }
        Ok(removed)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Event>> {
        let mut events = self.by_user.get(user_id).cloned().unwrap_or_default();
        // Stable, so same-slot events keep creation order.
        events.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        Ok(events)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
