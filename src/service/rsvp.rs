use chrono::Utc;
use uuid::Uuid;

use crate::{dto::NewRsvpDto, errors::ApiError, models::Rsvp, store::EventStore};

// Runs one ledger mutation as an atomic unit: snapshot the event, rewrite
// it, commit conditionally. A lost race re-evaluates everything (capacity
// included) against a fresh snapshot instead of surfacing an error.
fn with_event<T>(
   store: &EventStore,
   event_id: Uuid,
   mut op: impl FnMut(&mut crate::models::Event) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
   loop {
      let (version, mut event) = store.snapshot(event_id)?;
      let out = op(&mut event)?;
      match store.commit(event_id, version, event) {
         Ok(()) => return Ok(out),
         Err(ApiError::CapacityRaceLost) => continue,
         Err(err) => return Err(err),
      }
   }
}

/// Submit or resubmit an RSVP. Resubmission by the same identity updates
/// the existing record in place, never duplicates it. New attending RSVPs
/// take a confirmed slot when capacity allows and join the end of the
/// waitlist otherwise.
pub fn submit(store: &EventStore, event_id: Uuid, dto: NewRsvpDto) -> Result<Rsvp, ApiError> {
   let identity = dto.identity()?;
   let going = dto.is_going();
   with_event(store, event_id, |event| {
      if event.cancelled {
         return Err(ApiError::EventCancelled);
      }
      let now = Utc::now();
      if let Some(idx) = event.find_by_identity(&identity) {
         let rsvp = &mut event.rsvps[idx];
         if let Some(note) = &dto.note {
            rsvp.note = Some(note.to_string());
         }
         // A revived RSVP rejoins the queue at the back; touching the
         // note on an active one keeps its place.
         if rsvp.cancelled && going {
            rsvp.created_at = now;
         }
         rsvp.cancelled = !going;
         event.update_waitlist();
         return Ok(event.rsvps[idx].clone());
      }
      let idx = event.rsvps.len();
      event.rsvps.push(Rsvp {
         id: Uuid::new_v4(),
         event_id,
         identity: identity.clone(),
         note: dto.note.clone(),
         cancelled: !going,
         waitlisted: false,
         created_at: now,
      });
      event.update_waitlist();
      Ok(event.rsvps[idx].clone())
   })
}

/// Soft cancellation: the record stays in the ledger with
/// `cancelled = true`, and a freed confirmed slot goes to the earliest
/// waitlisted RSVP. Allowed on cancelled events so users can withdraw.
pub fn cancel(store: &EventStore, event_id: Uuid, rsvp_id: Uuid) -> Result<Rsvp, ApiError> {
   with_event(store, event_id, |event| {
      let idx = event.find_rsvp(rsvp_id).ok_or(ApiError::RsvpNotFound)?;
      event.rsvps[idx].cancelled = true;
      event.update_waitlist();
      Ok(event.rsvps[idx].clone())
   })
}

/// Hard un-RSVP: removes the record outright, then promotes from the
/// waitlist exactly like a soft cancel.
pub fn remove(store: &EventStore, event_id: Uuid, rsvp_id: Uuid) -> Result<(), ApiError> {
   with_event(store, event_id, |event| {
      let idx = event.find_rsvp(rsvp_id).ok_or(ApiError::RsvpNotFound)?;
      event.rsvps.remove(idx);
      event.update_waitlist();
      Ok(())
   })
}

pub fn get(store: &EventStore, event_id: Uuid, rsvp_id: Uuid) -> Result<Rsvp, ApiError> {
   let event = store.get(event_id)?;
   let idx = event.find_rsvp(rsvp_id).ok_or(ApiError::RsvpNotFound)?;
   Ok(event.rsvps[idx].clone())
}

pub fn get_all(store: &EventStore, event_id: Uuid) -> Result<Vec<Rsvp>, ApiError> {
   let event = store.get(event_id)?;
   Ok(event.rsvps)
}

pub fn attendance_count(store: &EventStore, event_id: Uuid) -> Result<usize, ApiError> {
   let event = store.get(event_id)?;
   Ok(event.rsvp_count())
}
