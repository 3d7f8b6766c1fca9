//! Channel delivery semantics under real thread interleavings.

use std::collections::HashSet;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use weft_runtime::{Channel, ChannelRegistry, Payload};

/// Sentinel telling a competing consumer to stop.
const STOP: u32 = u32::MAX;

fn encode(n: u32) -> Payload {
    Payload::from_bytes(n.to_le_bytes().to_vec())
}

fn decode(payload: &Payload) -> u32 {
    u32::from_le_bytes(payload.as_bytes().try_into().expect("4-byte payload"))
}

#[test]
fn payloads_arrive_in_push_order() {
    let ch = Channel::new();
    for n in [10, 20, 30] {
        ch.push(encode(n));
    }
    assert_eq!(decode(&ch.pop().unwrap()), 10);
    assert_eq!(decode(&ch.pop().unwrap()), 20);
    assert_eq!(decode(&ch.pop().unwrap()), 30);
    assert!(ch.pop().is_none());
}

#[test]
fn each_payload_is_delivered_exactly_once() {
    const ITEMS: u32 = 200;
    const CONSUMERS: usize = 4;

    let ch = Arc::new(Channel::new());
    let (tx, rx) = mpsc::channel::<u32>();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let ch = Arc::clone(&ch);
            let tx = tx.clone();
            thread::spawn(move || loop {
                let n = decode(&ch.blocked_pop());
                if n == STOP {
                    break;
                }
                tx.send(n).unwrap();
            })
        })
        .collect();
    drop(tx);

    for n in 0..ITEMS {
        ch.push(encode(n));
    }
    for _ in 0..CONSUMERS {
        ch.push(encode(STOP));
    }
    for c in consumers {
        c.join().unwrap();
    }

    let received: Vec<u32> = rx.into_iter().collect();
    assert_eq!(received.len(), ITEMS as usize, "no loss, no duplication");
    let distinct: HashSet<u32> = received.into_iter().collect();
    assert_eq!(distinct, (0..ITEMS).collect::<HashSet<u32>>());
}

#[test]
fn blocked_pop_suspends_until_a_push_arrives() {
    let ch = Arc::new(Channel::new());
    let consumer = {
        let ch = Arc::clone(&ch);
        thread::spawn(move || decode(&ch.blocked_pop()))
    };

    let started = Instant::now();
    thread::sleep(Duration::from_millis(50));
    ch.push(encode(42));

    assert_eq!(consumer.join().unwrap(), 42);
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[test]
fn timed_pop_respects_the_deadline_on_an_idle_channel() {
    let ch = Channel::new();
    let started = Instant::now();
    let got = ch.timed_pop(Duration::from_millis(50));
    let elapsed = started.elapsed();

    assert!(got.is_none());
    assert!(elapsed >= Duration::from_millis(50), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "unbounded delay: {elapsed:?}");
}

#[test]
fn timed_pop_returns_a_payload_pushed_mid_wait() {
    let ch = Arc::new(Channel::new());
    let producer = {
        let ch = Arc::clone(&ch);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            ch.push(encode(7));
        })
    };

    let got = ch.timed_pop(Duration::from_millis(500));
    producer.join().unwrap();
    assert_eq!(decode(&got.expect("push beat the deadline")), 7);
}

#[test]
fn one_payload_satisfies_exactly_one_of_two_timed_consumers() {
    let ch = Arc::new(Channel::new());

    let consumers: Vec<_> = (0..2)
        .map(|_| {
            let ch = Arc::clone(&ch);
            thread::spawn(move || ch.timed_pop(Duration::from_millis(400)).is_some())
        })
        .collect();

    thread::sleep(Duration::from_millis(10));
    ch.push(encode(1));

    let wins: usize = consumers
        .into_iter()
        .map(|c| usize::from(c.join().unwrap()))
        .sum();
    assert_eq!(wins, 1, "the payload must go to exactly one consumer");
}

#[test]
fn registry_connects_producer_and_consumer_by_name() {
    let registry = Arc::new(ChannelRegistry::new());
    registry.create("results").unwrap();

    let producer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let ch = registry.open("results").unwrap();
            ch.push(encode(99));
        })
    };

    let ch = registry.open("results").unwrap();
    let got = ch.timed_pop(Duration::from_secs(2)).expect("producer pushes");
    producer.join().unwrap();
    assert_eq!(decode(&got), 99);
}
