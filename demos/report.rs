//! Generates and exports the plain-text event report

use headcount::config::MEMORY_DATABASE_URL;
use headcount::{connect, report, Config, Event, EventStatus, EventStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut config = Config::default();
    config.database.url = MEMORY_DATABASE_URL.to_string();

    let pool = connect(&config.database).await.unwrap();
    let store = EventStore::new(pool);
    store.init().await.unwrap();

    // A handful of events in various stages
    let seed = [
        ("Spring Workshop", "2026-04-18", "Lab 2", 25, 25, EventStatus::Completed),
        ("Tech Conference", "2026-09-12", "Convention Center", 100, 64, EventStatus::Planned),
        ("Monthly Meetup", "2026-09-03", "Community Hall", 30, 12, EventStatus::Planned),
        ("Beta Launch", "2026-08-25", "Main Office", 50, 31, EventStatus::Ongoing),
        ("Winter Gala", "2026-12-05", "Grand Hotel", 200, 0, EventStatus::Cancelled),
    ];
    for (name, date, location, capacity, attendees, status) in seed {
        let mut event = Event::new(
            name.to_string(),
            date,
            location.to_string(),
            String::new(),
            capacity,
        );
        event.set_current_attendees(attendees);
        event.set_status(status);
        store.create(&mut event).await.unwrap();
    }

    println!("{}", report::generate(&store).await.unwrap());

    let path = std::env::temp_dir().join("headcount_report.txt");
    report::export(&store, &path).await.unwrap();
    println!("The same report has been exported to {:?}", path);
}
