use serde::{Deserialize, Serialize};
use chrono::{self, Utc};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{Event, Identity};

#[derive(Debug, Deserialize, Clone)]
pub struct NewEventDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub capacity: Option<usize>,
}

/// RSVP submission payload. `user` names a registered account; otherwise
/// `use_anonymous` must be set and `name` supplied. `going` defaults to
/// true; `going = false` (or `cancelled = true`, the older field the
/// clients still send) records an explicit decline.
#[derive(Debug, Deserialize, Clone)]
pub struct NewRsvpDto {
    pub user: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub use_anonymous: bool,
    pub note: Option<String>,
    pub going: Option<bool>,
    pub cancelled: Option<bool>,
}

impl NewRsvpDto {
    pub fn identity(&self) -> Result<Identity, ApiError> {
        if let Some(user) = self.user {
            return Ok(Identity::Account { user });
        }
        if self.use_anonymous {
            if let Some(name) = &self.name {
                if !name.trim().is_empty() {
                    return Ok(Identity::Anonymous {
                        name: name.trim().to_string(),
                        email: self.email.clone(),
                    });
                }
            }
        }
        Err(ApiError::InvalidIdentity)
    }

    pub fn is_going(&self) -> bool {
        self.going.unwrap_or(true) && !self.cancelled.unwrap_or(false)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UpdateEventDto {
    pub description: Option<String>,
    pub cancelled: Option<bool>,
    pub archived: Option<bool>,
}

impl UpdateEventDto {
    pub fn apply(&self, event: &mut Event) {
        if let Some(v) = &self.description {
            event.description = v.to_string();
        }
        if let Some(v) = self.cancelled {
            event.cancelled = v;
        }
        if let Some(v) = self.archived {
            event.archived = v;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: Option<chrono::DateTime<Utc>>,
    pub end: Option<chrono::DateTime<Utc>>,
}

/// Event as served to clients: the record plus the computed attendance
/// count the calendar renders.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub rsvp_count: usize,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let rsvp_count = event.rsvp_count();
        Self { event, rsvp_count }
    }
}
