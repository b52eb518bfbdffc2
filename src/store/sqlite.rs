//! The SQLite implementation of the event store

use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use super::EventStatistics;
use crate::error::{Error, Result};
use crate::event::{Event, EventStatus};

const CREATE_EVENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        event_date DATE NOT NULL,
        location TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        capacity INTEGER NOT NULL,
        current_attendees INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'PLANNED'
            CHECK (status IN ('PLANNED', 'ONGOING', 'COMPLETED', 'CANCELLED')),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_event_date ON events (event_date)";

// SQLite has no ON UPDATE CURRENT_TIMESTAMP, a trigger keeps updated_at fresh
const CREATE_UPDATED_AT_TRIGGER: &str = r#"
    CREATE TRIGGER IF NOT EXISTS events_set_updated_at
    AFTER UPDATE ON events
    BEGIN
        UPDATE events SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
    END
"#;

/// The persistent home of [`Event`]s.
///
/// Wraps a connection pool the caller opens (usually through
/// [`connect`](super::connect)) and hands in. Reads return the events ordered
/// by date, soonest first; rows that decode to no valid event surface as errors
/// rather than being skipped
#[derive(Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the schema when it does not exist yet: the events table,
    /// its date index and the `updated_at` trigger
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_EVENTS_TABLE)
            .execute(&self.pool)
            .await
            .inspect_err(|err| log::error!("Error creating events table: {}", err))?;
        sqlx::query(CREATE_DATE_INDEX)
            .execute(&self.pool)
            .await
            .inspect_err(|err| log::error!("Error creating date index: {}", err))?;
        sqlx::query(CREATE_UPDATED_AT_TRIGGER)
            .execute(&self.pool)
            .await
            .inspect_err(|err| log::error!("Error creating update trigger: {}", err))?;
        Ok(())
    }

    /// Persist a new event and write the generated id back into it
    pub async fn create(&self, event: &mut Event) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (name, event_date, location, description, capacity, current_attendees, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.name())
        .bind(event.date())
        .bind(event.location())
        .bind(event.description())
        .bind(event.capacity())
        .bind(event.current_attendees())
        .bind(event.status().as_str())
        .execute(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error creating event: {}", err))?;

        event.set_id(result.last_insert_rowid());
        Ok(())
    }

    /// Every stored event, ordered by date
    pub async fn get_all(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error retrieving events: {}", err))?;

        rows.iter().map(event_from_row).collect()
    }

    /// The event with the given id, or [`Error::NotFound`]
    pub async fn get_by_id(&self, id: i64) -> Result<Event> {
        let row = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error retrieving event: {}", err))?
        .ok_or(Error::NotFound { id })?;

        event_from_row(&row)
    }

    /// Overwrite the stored state of an event, identified by its id.
    /// Returns [`Error::NotFound`] when no such row exists
    pub async fn update(&self, event: &Event) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = ?, event_date = ?, location = ?, description = ?,
                capacity = ?, current_attendees = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(event.name())
        .bind(event.date())
        .bind(event.location())
        .bind(event.description())
        .bind(event.capacity())
        .bind(event.current_attendees())
        .bind(event.status().as_str())
        .bind(event.id())
        .execute(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error updating event: {}", err))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id: event.id() });
        }
        Ok(())
    }

    /// Delete an event by id. Returns [`Error::NotFound`] when no such row exists
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|err| log::error!("Error deleting event: {}", err))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id });
        }
        Ok(())
    }

    /// Events whose name contains `needle`, ignoring ASCII case.
    /// `%` and `_` in the needle keep their SQL wildcard meaning
    pub async fn search_by_name(&self, needle: &str) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            WHERE name LIKE ?
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .bind(like_pattern(needle))
        .fetch_all(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error searching events: {}", err))?;

        rows.iter().map(event_from_row).collect()
    }

    /// Events whose location contains `needle`, ignoring ASCII case
    pub async fn search_by_location(&self, needle: &str) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            WHERE location LIKE ?
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .bind(like_pattern(needle))
        .fetch_all(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error searching events by location: {}", err))?;

        rows.iter().map(event_from_row).collect()
    }

    /// Events in the given lifecycle stage
    pub async fn search_by_status(&self, status: EventStatus) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            WHERE status = ?
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error retrieving events by status: {}", err))?;

        rows.iter().map(event_from_row).collect()
    }

    /// Events dated within `start..=end`
    pub async fn search_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, event_date, location, description, capacity, current_attendees, status
            FROM events
            WHERE event_date BETWEEN ? AND ?
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error retrieving events by date range: {}", err))?;

        rows.iter().map(event_from_row).collect()
    }

    /// Aggregate counters over the whole table. All zeroes when it is empty
    pub async fn statistics(&self) -> Result<EventStatistics> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total_events,
                COALESCE(SUM(CASE WHEN status = 'PLANNED' THEN 1 ELSE 0 END), 0) AS planned_events,
                COALESCE(SUM(CASE WHEN status = 'ONGOING' THEN 1 ELSE 0 END), 0) AS ongoing_events,
                COALESCE(SUM(CASE WHEN status = 'COMPLETED' THEN 1 ELSE 0 END), 0) AS completed_events,
                COALESCE(SUM(CASE WHEN status = 'CANCELLED' THEN 1 ELSE 0 END), 0) AS cancelled_events,
                COALESCE(SUM(capacity), 0) AS total_capacity,
                COALESCE(SUM(current_attendees), 0) AS total_attendees
            FROM events
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .inspect_err(|err| log::error!("Error getting statistics: {}", err))?;

        Ok(EventStatistics {
            total_events: row.try_get("total_events")?,
            planned_events: row.try_get("planned_events")?,
            ongoing_events: row.try_get("ongoing_events")?,
            completed_events: row.try_get("completed_events")?,
            cancelled_events: row.try_get("cancelled_events")?,
            total_capacity: row.try_get("total_capacity")?,
            total_attendees: row.try_get("total_attendees")?,
        })
    }
}

fn event_from_row(row: &SqliteRow) -> Result<Event> {
    let status: String = row.try_get("status")?;
    Ok(Event::new_with_stored_state(
        row.try_get("id")?,
        row.try_get("name")?,
        row.try_get("event_date")?,
        row.try_get("location")?,
        row.try_get("description")?,
        row.try_get("capacity")?,
        row.try_get("current_attendees")?,
        status.parse()?,
    ))
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", needle)
}
