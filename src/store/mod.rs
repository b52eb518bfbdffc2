//! SQL persistence for [`Event`](crate::Event)s
//!
//! [`connect`] opens the configured pool; [`EventStore`] wraps a pool the
//! caller hands in and runs one parameterized statement per operation. The
//! store holds no other state, so it can be cloned freely and shared between
//! tasks

mod sqlite;

pub use sqlite::EventStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::{DatabaseConfig, MEMORY_DATABASE_URL};
use crate::error::Result;

/// Aggregate counters over every stored event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventStatistics {
    pub total_events: i64,
    pub planned_events: i64,
    pub ongoing_events: i64,
    pub completed_events: i64,
    pub cancelled_events: i64,
    pub total_capacity: i64,
    pub total_attendees: i64,
}

impl EventStatistics {
    /// How much of the total capacity is taken, as a percentage.
    /// `0.0` when there is no capacity at all
    pub fn occupancy_rate(&self) -> f64 {
        if self.total_capacity > 0 {
            self.total_attendees as f64 / self.total_capacity as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Open the configured database, creating the file when missing.
///
/// With `fallback_to_memory` set, a database that cannot be opened degrades to
/// a fresh in-memory store instead of an error. The fallback is logged, since
/// events stored that way are lost when the pool is dropped
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    match open_pool(&config.url, config.max_connections).await {
        Ok(pool) => Ok(pool),
        Err(err) if config.fallback_to_memory => {
            log::warn!("Unable to open {}: {}. Falling back to an in-memory database.", config.url, err);
            Ok(open_pool(MEMORY_DATABASE_URL, config.max_connections).await?)
        }
        Err(err) => Err(err.into()),
    }
}

async fn open_pool(url: &str, max_connections: u32) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    // Every pooled connection to an in-memory database would get its own,
    // private database. A single connection keeps everyone on the same one,
    // and it must never be reaped: closing it destroys the database, schema
    // and all
    let pool_options = if is_memory_url(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };
    pool_options.connect_with(options).await
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_are_recognized() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file:events?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://events.db"));
    }

    #[test]
    fn occupancy_is_a_percentage_of_the_total_capacity() {
        let stats = EventStatistics {
            total_events: 2,
            total_capacity: 200,
            total_attendees: 53,
            ..EventStatistics::default()
        };
        assert!((stats.occupancy_rate() - 26.5).abs() < 1e-9);
    }

    #[test]
    fn occupancy_of_nothing_is_zero() {
        assert_eq!(EventStatistics::default().occupancy_rate(), 0.0);
    }
}
