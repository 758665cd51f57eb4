use chrono::Utc;
use uuid::Uuid;

/// Who an RSVP belongs to: a registered account, or a free-text
/// name/email pair for guests without an account.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Account { user: Uuid },
    Anonymous { name: String, email: Option<String> },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Rsvp {
    pub id: Uuid,
    pub event_id: Uuid,
    pub identity: Identity,
    pub note: Option<String>,
    pub cancelled: bool,
    pub waitlisted: bool,
    pub created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub cancelled: bool,
    pub archived: bool,
    pub capacity: Option<usize>,
    // Insertion order is arrival order and decides waitlist promotion.
    pub rsvps: Vec<Rsvp>,
    pub created_at: chrono::DateTime<Utc>,
}

impl Event {
    /// The display-facing attendance count: RSVPs that are neither
    /// cancelled nor waitlisted.
    pub fn rsvp_count(&self) -> usize {
        self.rsvps
            .iter()
            .filter(|r| !r.cancelled && !r.waitlisted)
            .count()
    }

    /// Recomputes the `waitlisted` flags after any RSVP mutation.
    ///
    /// Non-cancelled RSVPs keep their slots confirmed-first, then by
    /// creation time, so cancelling a confirmed RSVP promotes exactly the
    /// earliest-created waitlisted one. Without a capacity nothing is
    /// ever waitlisted.
    pub fn update_waitlist(&mut self) {
        let limit = match self.capacity {
            Some(n) => n,
            None => {
                for rsvp in self.rsvps.iter_mut() {
                    rsvp.waitlisted = false;
                }
                return;
            }
        };
        let mut order: Vec<usize> = (0..self.rsvps.len())
            .filter(|&i| !self.rsvps[i].cancelled)
            .collect();
        order.sort_by_key(|&i| (self.rsvps[i].waitlisted, self.rsvps[i].created_at));
        for (slot, &i) in order.iter().enumerate() {
            self.rsvps[i].waitlisted = slot >= limit;
        }
    }

    pub fn find_rsvp(&self, rsvp_id: Uuid) -> Option<usize> {
        self.rsvps.iter().position(|r| r.id == rsvp_id)
    }

    pub fn find_by_identity(&self, identity: &Identity) -> Option<usize> {
        self.rsvps.iter().position(|r| &r.identity == identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rsvp(event_id: Uuid, offset_secs: i64) -> Rsvp {
        Rsvp {
            id: Uuid::new_v4(),
            event_id,
            identity: Identity::Anonymous {
                name: format!("guest-{}", offset_secs),
                email: None,
            },
            note: None,
            cancelled: false,
            waitlisted: false,
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    fn event(capacity: Option<usize>) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "meetup".to_string(),
            description: String::new(),
            date: Utc::now(),
            end_date: None,
            cancelled: false,
            archived: false,
            capacity,
            rsvps: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_capacity_never_waitlists() {
        let mut event = event(None);
        for i in 0..5 {
            event.rsvps.push(rsvp(event.id, i));
            event.update_waitlist();
        }
        assert_eq!(event.rsvp_count(), 5);
        assert!(event.rsvps.iter().all(|r| !r.waitlisted));
    }

    #[test]
    fn overflow_goes_to_waitlist_in_arrival_order() {
        let mut event = event(Some(2));
        for i in 0..4 {
            event.rsvps.push(rsvp(event.id, i));
            event.update_waitlist();
        }
        assert_eq!(event.rsvp_count(), 2);
        assert!(!event.rsvps[0].waitlisted);
        assert!(!event.rsvps[1].waitlisted);
        assert!(event.rsvps[2].waitlisted);
        assert!(event.rsvps[3].waitlisted);
    }

    #[test]
    fn cancelled_rsvps_free_their_slot() {
        let mut event = event(Some(1));
        for i in 0..3 {
            event.rsvps.push(rsvp(event.id, i));
            event.update_waitlist();
        }
        event.rsvps[0].cancelled = true;
        event.update_waitlist();
        // earliest waitlisted RSVP gets the freed slot
        assert!(!event.rsvps[1].waitlisted);
        assert!(event.rsvps[2].waitlisted);
        assert_eq!(event.rsvp_count(), 1);
    }

    #[test]
    fn confirmed_keep_slots_over_earlier_waitlisted() {
        let mut event = event(Some(1));
        // arrives later but is already confirmed
        let mut confirmed = rsvp(event.id, 10);
        confirmed.waitlisted = false;
        let mut waitlisted = rsvp(event.id, 0);
        waitlisted.waitlisted = true;
        event.rsvps.push(waitlisted);
        event.rsvps.push(confirmed);
        event.update_waitlist();
        assert!(event.rsvps[0].waitlisted);
        assert!(!event.rsvps[1].waitlisted);
    }
}
