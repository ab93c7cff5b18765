//! Hello World Example
//!
//! Demonstrates the basics of a tagged subject:
//!
//! - Untagged and tagged subscriptions living side by side
//! - Callbacks with different argument shapes under one tag
//! - Manual (`Subscription`) and scope-bound (`AutoUnsubscribe`) cancellation
//! - Notifying from several threads at once
//!
//! The example installs a `tracing` subscriber at TRACE level, so every
//! subscribe, unsubscribe and notification shows up in the output.

use std::sync::Arc;

use herald::{Config, PanicPolicy, Subject};

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
enum Room {
    #[default]
    Lobby,
    Kitchen,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let subject = Arc::new(Subject::<Room>::with_config(
        Config::default()
            .with_name("house")
            .with_panic_policy(PanicPolicy::Isolate),
    ));

    // Untagged subscribers listen in the lobby (the default room).
    let greeter = subject.subscribe(|name: String| println!("Hello, {name}!"));

    // Kitchen subscribers, two different signatures.
    let _oven = subject
        .subscribe_tagged(Room::Kitchen, |celsius: u16| println!("Oven at {celsius}°C"))
        .into_auto();
    let _timer = subject
        .subscribe_tagged(Room::Kitchen, |dish: &'static str, minutes: u32| {
            println!("{dish} ready in {minutes} min")
        })
        .into_auto();

    subject.notify(("World".to_string(),));
    subject.notify_tagged(&Room::Kitchen, (180u16,));
    subject.notify_tagged(&Room::Kitchen, ("Lasagna", 45u32));

    // Different argument shape: nobody listens for (u8,) in the kitchen.
    subject.notify_tagged(&Room::Kitchen, (180u8,));

    let workers: Vec<_> = ["Ada", "Grace", "Linus"]
        .into_iter()
        .map(|name| {
            let subject = subject.clone();
            std::thread::spawn(move || subject.notify((name.to_string(),)))
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    greeter.unsubscribe();
    subject.notify(("nobody".to_string(),));
}
