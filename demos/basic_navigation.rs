//! Basic Navigation
//!
//! This example walks an in-memory history through the four kinds of
//! navigation and prints what listeners see.
//!
//! Key concepts:
//! - PUSH, REPLACE and POP actions
//! - Relative paths and inherited search/hash
//! - Host traversal delivered through `sync`
//! - Basename handling
//!
//! Run with: cargo run --example basic_navigation

use serde_json::json;
use waypoint::{History, LocationDescriptor, MemoryHost};

fn main() {
    let history = History::builder(MemoryHost::with_entries(["/app/inbox"], 0))
        .basename("/app")
        .build()
        .unwrap();

    println!("Initial location: {}", history.location().path());
    println!("Initial action: {}\n", history.action());

    let subscription = history.listen(|location, action| {
        println!(
            "  [{action}] {} (key: {})",
            location.path(),
            location.key.as_deref().unwrap_or("none")
        );
    });

    println!("Scenario 1: Push");
    history.push("/inbox/42?view=full").unwrap();
    history.push("#reply").unwrap();
    history.push("../drafts").unwrap();
    println!();

    println!("Scenario 2: Replace with state");
    history
        .replace(
            LocationDescriptor::new()
                .pathname("/drafts/7")
                .state(json!({ "scroll": 120 })),
        )
        .unwrap();
    println!("  state: {:?}\n", history.location().state);

    println!("Scenario 3: Back and forward");
    history.go(-2).unwrap();
    history.sync().unwrap();
    history.go_forward().unwrap();
    history.sync().unwrap();
    println!();

    println!("Scenario 4: Hrefs");
    println!("  href for /settings: {}", history.create_href("/settings"));
    history.with_host(|host| {
        for (index, entry) in host.entries().iter().enumerate() {
            println!("  host entry {index}: {}", entry.url);
        }
    });

    subscription.unsubscribe();
    println!("\nListener removed");
}
