//! Plain-text reports summarizing every stored event

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::event::{Event, EventStatus};
use crate::store::{EventStatistics, EventStore};
use crate::utils;

/// How many events the "top by attendance" section lists
const TOP_EVENTS: usize = 5;

/// Generate the report text for everything currently in `store`
pub async fn generate(store: &EventStore) -> Result<String> {
    let stats = store.statistics().await?;
    let events = store.get_all().await?;
    Ok(render(&stats, &events))
}

/// Generate the report and write it to `path`, overwriting any previous file
pub async fn export(store: &EventStore, path: &Path) -> Result<()> {
    let report = generate(store).await?;
    fs::write(path, &report)?;
    log::info!("Report exported to {:?}", path);
    Ok(())
}

/// Render the report from already-loaded data.
///
/// `events` is expected in the store's date-ascending order; the details and
/// by-status sections keep that order. An empty store produces a short
/// "No events found" variant
pub fn render(stats: &EventStatistics, events: &[Event]) -> String {
    let mut report = String::new();

    report.push_str(&"=".repeat(60));
    report.push('\n');
    report.push_str("                    EVENT MANAGEMENT REPORT\n");
    report.push_str(&"=".repeat(60));
    report.push('\n');
    report.push_str(&format!("Generated on: {}\n\n", utils::display_date(utils::today())));

    report.push_str("SUMMARY STATISTICS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    report.push_str(&format!("Total Events: {}\n", stats.total_events));

    if stats.total_events == 0 {
        report.push_str("\nNo events found in database.\n");
        return report;
    }

    report.push_str(&format!("Planned Events: {}\n", stats.planned_events));
    report.push_str(&format!("Ongoing Events: {}\n", stats.ongoing_events));
    report.push_str(&format!("Completed Events: {}\n", stats.completed_events));
    report.push_str(&format!("Cancelled Events: {}\n", stats.cancelled_events));

    report.push_str("\nCAPACITY STATISTICS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    report.push_str(&format!("Total Capacity: {}\n", stats.total_capacity));
    report.push_str(&format!("Total Attendees: {}\n", stats.total_attendees));
    report.push_str(&format!("Overall Occupancy: {:.1}%\n", stats.occupancy_rate()));

    report.push_str("\nEVENT DETAILS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    for event in events {
        report.push_str(&format!("ID: {}\n", event.id()));
        report.push_str(&format!("Name: {}\n", event.name()));
        report.push_str(&format!("Date: {}\n", utils::display_date(event.date())));
        report.push_str(&format!("Location: {}\n", event.location()));
        report.push_str(&format!("Capacity: {}\n", event.capacity()));
        report.push_str(&format!("Attendees: {}\n", event.current_attendees()));
        report.push_str(&format!("Available: {}\n", event.available_spots()));
        report.push_str(&format!("Status: {}\n", event.status()));
        report.push_str(&format!("Description: {}\n", event.description()));
        report.push_str(&"-".repeat(30));
        report.push('\n');
    }

    report.push_str("\nTOP EVENTS BY ATTENDANCE\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    let mut by_attendance: Vec<&Event> = events.iter().collect();
    // Stable sort, ties keep their date order
    by_attendance.sort_by(|a, b| b.current_attendees().cmp(&a.current_attendees()));
    for (rank, event) in by_attendance.iter().take(TOP_EVENTS).enumerate() {
        let percentage = if event.capacity() > 0 {
            event.current_attendees() as f64 / event.capacity() as f64 * 100.0
        } else {
            0.0
        };
        report.push_str(&format!("{}. {} - {}/{} ({:.1}%)\n",
            rank + 1, event.name(), event.current_attendees(), event.capacity(), percentage));
    }

    report.push_str("\nEVENTS BY STATUS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    for status in EventStatus::ALL {
        report.push_str(&format!("\n{} Events:\n", status));
        let matching: Vec<&Event> = events.iter().filter(|event| event.status() == status).collect();
        if matching.is_empty() {
            report.push_str("  No events found.\n");
        } else {
            for event in matching {
                report.push_str(&format!("  - {} ({})\n", event.name(), utils::display_date(event.date())));
            }
        }
    }

    report.push('\n');
    report.push_str(&"=".repeat(60));
    report.push('\n');
    report.push_str("End of Report\n");

    report
}
