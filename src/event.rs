//! Events and their capacity-bounded attendance

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::Error;
use crate::utils;

/// The lifecycle stage of an event.
///
/// Stored in the database as the upper-case strings (`PLANNED`, `ONGOING`, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Every status, in the order reports list them
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Planned,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "PLANNED",
            EventStatus::Ongoing => "ONGOING",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Planned
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        match text {
            "PLANNED" => Ok(EventStatus::Planned),
            "ONGOING" => Ok(EventStatus::Ongoing),
            "COMPLETED" => Ok(EventStatus::Completed),
            "CANCELLED" => Ok(EventStatus::Cancelled),
            _ => Err(Error::InvalidStatus(text.to_string())),
        }
    }
}

/// A planned happening at some place and date, with a bounded number of seats.
///
/// The attendee counter always stays within `0..=capacity`: the mutators below
/// ignore any change that would take it out of these bounds, so an `Event` can
/// be handed to the store without further validation
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The storage-assigned row id. `0` until the event has been persisted
    id: i64,
    name: String,
    /// The day the event takes place. Events have no time-of-day
    date: NaiveDate,
    location: String,
    description: String,
    /// How many attendees fit in
    capacity: i32,
    current_attendees: i32,
    status: EventStatus,
}

impl Event {
    /// Create a brand new event that is not stored yet.
    ///
    /// `date_text` must be in `yyyy-MM-dd` form; an unparseable date falls back
    /// to today rather than failing. The event starts `Planned`, with no
    /// attendees and an unset id
    pub fn new(name: String, date_text: &str, location: String, description: String, capacity: i32) -> Self {
        let date = match utils::parse_date(date_text) {
            Some(date) => date,
            None => {
                log::warn!("Invalid date format: {:?}. Using current date.", date_text);
                utils::today()
            }
        };
        Self {
            id: 0,
            name,
            date,
            location,
            description,
            capacity,
            current_attendees: 0,
            status: EventStatus::Planned,
        }
    }

    /// Recreate an event from its stored state, e.g. a database row
    pub fn new_with_stored_state(id: i64, name: String, date: NaiveDate,
                                 location: String, description: String,
                                 capacity: i32, current_attendees: i32,
                                 status: EventStatus,
                              ) -> Self
    {
        Self {
            id,
            name,
            date,
            location,
            description,
            capacity,
            current_attendees,
            status,
        }
    }

    pub fn id(&self) -> i64           { self.id                 }
    pub fn name(&self) -> &str        { &self.name              }
    pub fn date(&self) -> NaiveDate   { self.date               }
    pub fn location(&self) -> &str    { &self.location          }
    pub fn description(&self) -> &str { &self.description       }
    pub fn capacity(&self) -> i32     { self.capacity           }
    pub fn status(&self) -> EventStatus     { self.status             }
    pub fn current_attendees(&self) -> i32  { self.current_attendees  }

    /// Whether every seat is taken
    pub fn is_full(&self) -> bool {
        self.current_attendees >= self.capacity
    }

    /// How many more attendees fit in
    pub fn available_spots(&self) -> i32 {
        self.capacity - self.current_attendees
    }

    /// Register one more attendee. Does nothing when the event is full
    pub fn add_attendee(&mut self) {
        if !self.is_full() {
            self.current_attendees += 1;
        }
    }

    /// Unregister one attendee. Does nothing when there is none
    pub fn remove_attendee(&mut self) {
        if self.current_attendees > 0 {
            self.current_attendees -= 1;
        }
    }

    /// Set the storage id. Called by the store right after an insert
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Change the date. `date_text` must be in `yyyy-MM-dd` form; an
    /// unparseable date leaves the current one unchanged
    pub fn set_date(&mut self, date_text: &str) {
        match utils::parse_date(date_text) {
            Some(date) => self.date = date,
            None => log::warn!("Invalid date format: {:?}. Keeping the current date.", date_text),
        }
    }

    pub fn set_location(&mut self, location: String) {
        self.location = location;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    /// Change the capacity. A value below 1, or below the current attendee
    /// count, is ignored
    pub fn set_capacity(&mut self, capacity: i32) {
        if capacity < 1 || capacity < self.current_attendees {
            log::warn!("Ignoring capacity {} that does not fit the {} current attendees", capacity, self.current_attendees);
            return;
        }
        self.capacity = capacity;
    }

    /// Overwrite the attendee counter. A value outside `0..=capacity` is ignored
    pub fn set_current_attendees(&mut self, count: i32) {
        if count < 0 || count > self.capacity {
            log::warn!("Ignoring attendee count {} outside of 0..={}", count, self.capacity);
            return;
        }
        self.current_attendees = count;
    }

    pub fn set_status(&mut self, status: EventStatus) {
        self.status = status;
    }
}

impl Display for Event {
    /// A one-line summary, with the date in display format
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID: {} | {} | {} | {} | {}",
               self.id, self.name, utils::display_date(self.date), self.location, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conference() -> Event {
        Event::new(
            String::from("Tech Conference"),
            "2026-06-01",
            String::from("Convention Center"),
            String::from("Annual technology conference"),
            100,
        )
    }

    #[test]
    fn new_events_start_planned_and_empty() {
        let event = conference();
        assert_eq!(event.id(), 0);
        assert_eq!(event.name(), "Tech Conference");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(event.status(), EventStatus::Planned);
        assert_eq!(event.current_attendees(), 0);
        assert_eq!(event.available_spots(), 100);
        assert!(!event.is_full());
    }

    #[test]
    fn invalid_creation_date_falls_back_to_today() {
        // "2024-02-30" is well-formed but does not exist on the calendar
        for bad_date in ["not-a-date", "2024-02-30"] {
            let before = utils::today();
            let event = Event::new(
                String::from("Oops"),
                bad_date,
                String::from("Somewhere"),
                String::new(),
                10,
            );
            let after = utils::today();
            assert!(event.date() == before || event.date() == after);
        }
    }

    #[test]
    fn attendees_stop_at_capacity() {
        let mut event = conference();
        for _ in 0..100 {
            event.add_attendee();
        }
        assert!(event.is_full());
        assert_eq!(event.current_attendees(), 100);
        assert_eq!(event.available_spots(), 0);

        event.add_attendee();
        assert_eq!(event.current_attendees(), 100);
    }

    #[test]
    fn attendees_stop_at_zero() {
        let mut event = conference();
        event.remove_attendee();
        assert_eq!(event.current_attendees(), 0);

        event.add_attendee();
        event.remove_attendee();
        assert_eq!(event.current_attendees(), 0);
    }

    #[test]
    fn capacity_cannot_drop_below_attendees() {
        let mut event = conference();
        for _ in 0..10 {
            event.add_attendee();
        }

        event.set_capacity(5);
        assert_eq!(event.capacity(), 100);

        event.set_capacity(0);
        assert_eq!(event.capacity(), 100);

        event.set_capacity(10);
        assert_eq!(event.capacity(), 10);
        assert!(event.is_full());
    }

    #[test]
    fn attendee_counter_stays_within_bounds() {
        let mut event = conference();
        event.set_current_attendees(42);
        assert_eq!(event.current_attendees(), 42);

        event.set_current_attendees(-1);
        assert_eq!(event.current_attendees(), 42);

        event.set_current_attendees(101);
        assert_eq!(event.current_attendees(), 42);

        event.set_current_attendees(100);
        assert!(event.is_full());
    }

    #[test]
    fn set_date_ignores_garbage() {
        let mut event = conference();
        event.set_date("2026-07-15");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2026, 7, 15).unwrap());

        event.set_date("15/07/2026");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2026, 7, 15).unwrap());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in EventStatus::ALL {
            assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
        }
        assert!("DELAYED".parse::<EventStatus>().is_err());
        assert!("planned".parse::<EventStatus>().is_err());
    }

    #[test]
    fn summary_uses_the_display_date_format() {
        let mut event = conference();
        event.set_id(7);
        assert_eq!(
            event.to_string(),
            "ID: 7 | Tech Conference | 01-06-2026 | Convention Center | PLANNED"
        );
    }
}
