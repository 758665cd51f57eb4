use chrono::Utc;
use uuid::Uuid;

use crate::{dto::{EventsQuery, NewEventDto, UpdateEventDto}, errors::ApiError, models::Event, store::EventStore};

pub fn create(store: &EventStore, dto: NewEventDto) -> Event {
   let event = Event {
      id: Uuid::new_v4(),
      name: dto.name,
      description: dto.description,
      date: dto.date,
      end_date: dto.end_date,
      cancelled: false,
      archived: false,
      capacity: dto.capacity,
      rsvps: Vec::new(),
      created_at: Utc::now(),
   };
   store.insert(event.clone());
   event
}

pub fn get_all(store: &EventStore, query: &EventsQuery) -> Vec<Event> {
   store
      .list()
      .into_iter()
      .filter(|e| query.start.map_or(true, |start| e.date >= start))
      .filter(|e| query.end.map_or(true, |end| e.date <= end))
      .collect()
}

pub fn get_by_id(store: &EventStore, id: Uuid) -> Result<Event, ApiError> {
   store.get(id)
}

/// Applies a partial update. Archived is display-only and cancellation
/// never touches existing RSVPs, so the waitlist only needs recomputing
/// for consistency with whatever the fields changed.
pub fn update(store: &EventStore, id: Uuid, fields: UpdateEventDto) -> Result<Event, ApiError> {
   loop {
      let (version, mut event) = store.snapshot(id)?;
      fields.apply(&mut event);
      event.update_waitlist();
      match store.commit(id, version, event.clone()) {
         Ok(()) => return Ok(event),
         Err(ApiError::CapacityRaceLost) => continue,
         Err(err) => return Err(err),
      }
   }
}

/// Marks the event cancelled. Existing RSVPs stay as they are; further
/// submissions are rejected while reads and withdrawals keep working.
pub fn cancel(store: &EventStore, id: Uuid) -> Result<Event, ApiError> {
   update(
      store,
      id,
      UpdateEventDto {
         cancelled: Some(true),
         ..UpdateEventDto::default()
      },
   )
}

#[cfg(test)]
mod tests {
   use super::*;
   use chrono::Duration;

   fn dto(name: &str, days_from_now: i64) -> NewEventDto {
      NewEventDto {
         name: name.to_string(),
         description: String::new(),
         date: Utc::now() + Duration::days(days_from_now),
         end_date: None,
         capacity: None,
      }
   }

   #[test]
   fn date_range_filter() {
      let store = EventStore::new();
      create(&store, dto("past", -10));
      let soon = create(&store, dto("soon", 1));
      create(&store, dto("far", 30));
      let query = EventsQuery {
         start: Some(Utc::now()),
         end: Some(Utc::now() + Duration::days(7)),
      };
      let events = get_all(&store, &query);
      assert_eq!(events.len(), 1);
      assert_eq!(events[0].id, soon.id);
   }

   #[test]
   fn patch_applies_only_supplied_fields() {
      let store = EventStore::new();
      let event = create(&store, dto("meetup", 1));
      let updated = update(
         &store,
         event.id,
         UpdateEventDto {
            description: Some("moved to the big hall".to_string()),
            ..UpdateEventDto::default()
         },
      )
      .unwrap();
      assert_eq!(updated.description, "moved to the big hall");
      assert!(!updated.cancelled);
      assert!(!updated.archived);
   }

   #[test]
   fn cancel_flags_the_event() {
      let store = EventStore::new();
      let event = create(&store, dto("meetup", 1));
      let cancelled = cancel(&store, event.id).unwrap();
      assert!(cancelled.cancelled);
      assert_eq!(
         update(&store, Uuid::new_v4(), UpdateEventDto::default()).unwrap_err(),
         ApiError::EventNotFound
      );
   }
}
