use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::Event;

struct Versioned {
    version: u64,
    event: Event,
}

/// In-memory event store. Mutations go through `snapshot` / `commit`: a
/// writer clones the event together with its version counter, rewrites the
/// clone, and commits conditionally on the version still matching. A
/// mismatch means another writer got there first and the caller retries
/// against a fresh snapshot, so all mutations of one event's RSVP set are
/// effectively serialized while different events never contend for longer
/// than the map lock. Reads are served from clones and never see a
/// half-applied update.
#[derive(Default)]
pub struct EventStore {
    events: RwLock<HashMap<Uuid, Versioned>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, event: Event) {
        let mut events = self.events.write().expect("event store lock poisoned");
        events.insert(event.id, Versioned { version: 0, event });
    }

    pub fn snapshot(&self, id: Uuid) -> Result<(u64, Event), ApiError> {
        let events = self.events.read().expect("event store lock poisoned");
        match events.get(&id) {
            Some(v) => Ok((v.version, v.event.clone())),
            None => Err(ApiError::EventNotFound),
        }
    }

    pub fn commit(&self, id: Uuid, expected: u64, event: Event) -> Result<(), ApiError> {
        let mut events = self.events.write().expect("event store lock poisoned");
        match events.get_mut(&id) {
            Some(v) => {
                if v.version != expected {
                    return Err(ApiError::CapacityRaceLost);
                }
                v.version += 1;
                v.event = event;
                Ok(())
            }
            None => Err(ApiError::EventNotFound),
        }
    }

    pub fn get(&self, id: Uuid) -> Result<Event, ApiError> {
        self.snapshot(id).map(|(_, event)| event)
    }

    pub fn list(&self) -> Vec<Event> {
        let events = self.events.read().expect("event store lock poisoned");
        let mut all: Vec<Event> = events.values().map(|v| v.event.clone()).collect();
        all.sort_by_key(|e| e.date);
        all
    }
}
