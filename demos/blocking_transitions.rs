//! Blocking Transitions
//!
//! This example guards an editor page with a transition hook and answers
//! confirmations both immediately and later.
//!
//! Key concepts:
//! - Hooks that allow, deny or ask for confirmation
//! - A confirmation function that defers its answer
//! - Requests queued behind a pending confirmation
//! - Reverting a denied back-button press
//!
//! Run with: cargo run --example blocking_transitions

use std::cell::RefCell;
use std::rc::Rc;
use waypoint::{Confirmation, History, NavigationHost, Prompt, SessionHost};

fn main() {
    let parked: Rc<RefCell<Option<Confirmation>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&parked);

    let history = History::builder(SessionHost::new("/"))
        .get_user_confirmation(move |message, confirmation| {
            println!("  confirm? \"{message}\"");
            *slot.borrow_mut() = Some(confirmation);
        })
        .build()
        .unwrap();

    history.listen(|location, action| println!("  [{action}] {}", location.path()));

    history.push("/editor").unwrap();

    let dirty = Rc::new(RefCell::new(true));
    let flag = Rc::clone(&dirty);
    let guard = history.block_with(move |location, _| {
        if location.pathname == "/editor" || !*flag.borrow() {
            None
        } else {
            Some(Prompt::from("You have unsaved changes. Leave anyway?"))
        }
    });

    println!("Scenario 1: Deny a push");
    history.push("/elsewhere").unwrap();
    resolve(&parked, false);
    println!("  still at {}\n", history.location().path());

    println!("Scenario 2: Queue behind a pending confirmation");
    history.push("/first").unwrap();
    history.push("/second").unwrap();
    if let Some(pending) = history.pending_transition() {
        println!(
            "  waiting on {} ({} ms so far)",
            pending.location.path(),
            pending.elapsed().as_millis()
        );
    }
    resolve(&parked, true);
    resolve(&parked, true);
    println!();

    println!("Scenario 3: Deny the back button");
    history.with_host(|host| host.back());
    history.sync().unwrap();
    resolve(&parked, false);
    history.sync().unwrap();
    println!("  host restored to {}\n", history.with_host(|host| host.current().url));

    println!("Scenario 4: Save, then leave freely");
    *dirty.borrow_mut() = false;
    history.push("/saved").unwrap();
    guard.unsubscribe();
    history.go_back().unwrap();
    history.sync().unwrap();
}

fn resolve(parked: &Rc<RefCell<Option<Confirmation>>>, allowed: bool) {
    let confirmation = parked.borrow_mut().take();
    if let Some(confirmation) = confirmation {
        println!("  answering {}", if allowed { "yes" } else { "no" });
        confirmation.resolve(allowed).unwrap();
    }
}
