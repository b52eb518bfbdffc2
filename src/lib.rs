//! This crate manages events and the people attending them.
//!
//! An [`Event`] knows its date, location, capacity and lifecycle [`EventStatus`], and owns the
//! attendance rules: the attendee counter can never leave `0..=capacity`, whatever sequence of
//! calls is made. \
//! Events are persisted in SQLite by the [`EventStore`] in the [`store`] module. The store wraps
//! a connection pool the caller opens, usually through [`connect`] with a [`Config`] loaded from
//! a TOML file, environment overrides, or built-in defaults. \
//! The [`report`] module renders a plain-text summary of everything stored, and can export it to
//! a file.

pub mod config;
pub use config::Config;
mod error;
pub use error::{Error, Result};
mod event;
pub use event::{Event, EventStatus};
pub mod report;
pub mod store;
pub use store::{connect, EventStatistics, EventStore};

pub mod utils;
