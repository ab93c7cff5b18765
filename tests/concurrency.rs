//! Snapshot isolation under concurrent subscribe, unsubscribe and notify.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering},
};

use herald::Subject;

const WRITERS: usize = 4;
const ROUNDS: usize = 250;

const PENDING: u8 = 0;
const SUBSCRIBED: u8 = 1;
const UNSUBSCRIBING: u8 = 2;
const UNSUBSCRIBED: u8 = 3;

/// Per-callback lifecycle, written by its writer thread and read by the notifier.
struct Slots {
    states: Vec<AtomicU8>,
    hits: Vec<AtomicUsize>,
}

impl Slots {
    fn new(len: usize) -> Arc<Self> {
        Arc::new(Self {
            states: (0..len).map(|_| AtomicU8::new(PENDING)).collect(),
            hits: (0..len).map(|_| AtomicUsize::new(0)).collect(),
        })
    }
}

#[test]
fn test_notify_sees_exactly_the_published_snapshot() {
    let subject = Subject::<String>::new();
    let slots = Slots::new(WRITERS * ROUNDS);
    let done = AtomicUsize::new(0);
    let checked_rounds = AtomicUsize::new(0);

    std::thread::scope(|s| {
        for writer in 0..WRITERS {
            let subject = &subject;
            let slots = slots.clone();
            let done = &done;
            s.spawn(move || {
                for round in 0..ROUNDS {
                    let slot = writer * ROUNDS + round;
                    let hits = slots.clone();
                    let sub = subject.subscribe_tagged("load", move |_: u64| {
                        hits.hits[slot].fetch_add(1, Ordering::SeqCst);
                    });
                    slots.states[slot].store(SUBSCRIBED, Ordering::SeqCst);
                    std::thread::yield_now();
                    slots.states[slot].store(UNSUBSCRIBING, Ordering::SeqCst);
                    sub.unsubscribe();
                    slots.states[slot].store(UNSUBSCRIBED, Ordering::SeqCst);
                }
                done.fetch_add(1, Ordering::SeqCst);
            });
        }

        let subject = &subject;
        let slots = slots.clone();
        let done = &done;
        let checked_rounds = &checked_rounds;
        s.spawn(move || {
            let mut round = 0u64;
            loop {
                let finished = done.load(Ordering::SeqCst) == WRITERS;

                slots.hits.iter().for_each(|h| h.store(0, Ordering::SeqCst));
                let before: Vec<u8> = slots
                    .states
                    .iter()
                    .map(|state| state.load(Ordering::SeqCst))
                    .collect();

                let invoked = subject.try_notify_tagged("load", (round,)).unwrap();

                let mut total = 0;
                for (slot, state) in before.iter().enumerate() {
                    let after = slots.states[slot].load(Ordering::SeqCst);
                    let hits = slots.hits[slot].load(Ordering::SeqCst);
                    assert!(hits <= 1, "slot {slot} invoked {hits} times");
                    match (*state, after) {
                        // Subscribed before the notification and not yet
                        // unsubscribing after it: must be in its snapshot.
                        (SUBSCRIBED, SUBSCRIBED) => {
                            assert_eq!(hits, 1, "live slot {slot} was skipped")
                        }
                        (UNSUBSCRIBED, _) => assert_eq!(hits, 0, "removed slot {slot} was invoked"),
                        _ => {}
                    }
                    total += hits;
                }
                assert_eq!(total, invoked);

                round += 1;
                checked_rounds.fetch_add(1, Ordering::SeqCst);
                if finished {
                    break;
                }
            }
        });
    });

    assert!(checked_rounds.load(Ordering::SeqCst) > 0);
    assert!(subject.is_empty());
    assert_eq!(subject.try_notify_tagged("load", (0u64,)), Ok(0));
}

#[test]
fn test_concurrent_subscribers_are_all_kept() {
    let subject = Subject::<u32>::new();
    let per_thread = 100;
    let hits = Arc::new(AtomicUsize::new(0));

    let subs = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8u32)
            .map(|tag| {
                let subject = &subject;
                let hits = hits.clone();
                s.spawn(move || {
                    (0..per_thread)
                        .map(|_| {
                            let hits = hits.clone();
                            subject.subscribe_tagged(tag % 2, move || {
                                hits.fetch_add(1, Ordering::SeqCst);
                            })
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(subject.subscriber_count(&0), 4 * per_thread);
    assert_eq!(subject.subscriber_count(&1), 4 * per_thread);
    subject.notify_tagged(&1, ());
    assert_eq!(hits.load(Ordering::SeqCst), 4 * per_thread);

    std::thread::scope(|s| {
        for chunk in subs.chunks(100) {
            s.spawn(move || chunk.iter().for_each(|sub| assert!(sub.unsubscribe())));
        }
    });
    assert!(subject.is_empty());
}

#[test]
fn test_writers_and_readers_proceed_while_callback_runs() {
    let subject = Arc::new(Subject::<String>::new());
    let entered = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));

    // A callback that keeps running until released, while another thread
    // notifies and subscribes concurrently.
    let entered_flag = entered.clone();
    let release_flag = release.clone();
    let _slow = subject.subscribe_tagged("slow", move || {
        entered_flag.store(true, Ordering::SeqCst);
        while !release_flag.load(Ordering::SeqCst) {
            std::thread::yield_now();
        }
    });
    let fast_hits = Arc::new(AtomicUsize::new(0));
    let counter = fast_hits.clone();
    let _fast = subject.subscribe_tagged("fast", move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let slow_subject = subject.clone();
    let slow = std::thread::spawn(move || slow_subject.notify_tagged("slow", ()));
    while !entered.load(Ordering::SeqCst) {
        std::thread::yield_now();
    }

    let late = subject.subscribe_tagged("fast", || {});
    subject.notify_tagged("fast", ());
    late.unsubscribe();
    assert_eq!(fast_hits.load(Ordering::SeqCst), 1);

    release.store(true, Ordering::SeqCst);
    slow.join().unwrap();
}
