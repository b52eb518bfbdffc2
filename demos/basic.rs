//! This is an example of how headcount can be used

use headcount::config::MEMORY_DATABASE_URL;
use headcount::{connect, Config, Event, EventStatus, EventStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example walks through the life of a few events, using an in-memory database.");
    println!("You can set the RUST_LOG environment variable to display more info about each step.");
    println!();

    // An on-disk database would come from Config::load(None) instead
    let mut config = Config::default();
    config.database.url = MEMORY_DATABASE_URL.to_string();

    let pool = connect(&config.database).await.unwrap();
    let store = EventStore::new(pool);
    store.init().await.unwrap();

    println!("---- Creating events -----");
    let mut conference = Event::new(
        String::from("Tech Conference"),
        "2026-09-12",
        String::from("Convention Center"),
        String::from("Annual technology conference"),
        100,
    );
    let mut meetup = Event::new(
        String::from("Monthly Meetup"),
        "2026-09-03",
        String::from("Community Hall"),
        String::from("Informal get-together"),
        30,
    );
    store.create(&mut conference).await.unwrap();
    store.create(&mut meetup).await.unwrap();
    println!("Stored \"{}\" with id {}", conference.name(), conference.id());
    println!("Stored \"{}\" with id {}", meetup.name(), meetup.id());

    println!("---- Registering attendees -----");
    for _ in 0..27 {
        meetup.add_attendee();
    }
    store.update(&meetup).await.unwrap();
    println!("{} now has {} attendees, {} spots left",
        meetup.name(), meetup.current_attendees(), meetup.available_spots());

    println!("---- All events, soonest first -----");
    for event in store.get_all().await.unwrap() {
        println!("{}", event);
    }

    println!("---- Searching -----");
    for event in store.search_by_name("conf").await.unwrap() {
        println!("By name \"conf\": {}", event);
    }
    for event in store.search_by_status(EventStatus::Planned).await.unwrap() {
        println!("Planned: {}", event);
    }

    println!("---- Cancelling the meetup -----");
    meetup.set_status(EventStatus::Cancelled);
    store.update(&meetup).await.unwrap();
    let reloaded = store.get_by_id(meetup.id()).await.unwrap();
    println!("Reloaded: {}", reloaded);

    println!("---- Statistics -----");
    let stats = store.statistics().await.unwrap();
    println!("{} events, {}/{} seats taken ({:.1}% occupancy)",
        stats.total_events, stats.total_attendees, stats.total_capacity, stats.occupancy_rate());
}
