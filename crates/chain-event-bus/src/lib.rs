//! # Chain Event Bus
//!
//! The teacher's `shared-bus` moves `BlockchainEvent`s between independent
//! subsystem services over an async `tokio::sync::broadcast` channel, with
//! its own envelope, nonce cache and dead-letter queue — the V2.3
//! choreography pattern. Spec §5 forbids that model in this core: there is
//! no background task a handler could suspend into, and every delivery
//! must be deterministic and replayable from a single call stack.
//!
//! This crate keeps the teacher's shape — a publisher, a subscriber list,
//! one topic per event family — and drops everything that depended on an
//! async runtime. `chain-keeper` drains each module keeper's pending event
//! list at the end of block application and calls [`EventBus::publish`]
//! once per event, synchronously, on the same thread that applied the
//! block.

use std::fmt;

use shared_types::ModuleEvent;

/// A synchronous event subscriber. Called in registration order, in the
/// same call stack that published the event — no channel, no buffering.
pub trait EventSubscriber {
    fn on_event(&mut self, event: &ModuleEvent);
}

/// Logs every event at `info` level. The default subscriber when nothing
/// else is registered, so events are never silently dropped.
#[derive(Default)]
pub struct LoggingSubscriber;

impl EventSubscriber for LoggingSubscriber {
    fn on_event(&mut self, event: &ModuleEvent) {
        tracing::info!(event = ?event, "module event");
    }
}

/// Collects every event published during a block, in emission order, for
/// callers that want to inspect what fired (tests, the RPC query layer).
#[derive(Default)]
pub struct RecordingSubscriber {
    pub events: Vec<ModuleEvent>,
}

impl EventSubscriber for RecordingSubscriber {
    fn on_event(&mut self, event: &ModuleEvent) {
        self.events.push(event.clone());
    }
}

/// In-process republication point. One instance lives for the process's
/// lifetime inside `chain-keeper`; it owns no thread and holds no events
/// across calls to [`Self::publish`].
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventSubscriber>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").field("subscriber_count", &self.subscribers.len()).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { subscribers: Vec::new() }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Publishes one event to every subscriber, in registration order.
    pub fn publish(&mut self, event: &ModuleEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_event(event);
        }
    }

    /// Drains a keeper's `take_events()` output through [`Self::publish`],
    /// in the order the keeper produced them.
    pub fn publish_all(&mut self, events: Vec<ModuleEvent>) {
        for event in &events {
            self.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct SharedRecorder(Rc<RefCell<Vec<ModuleEvent>>>);
    impl EventSubscriber for SharedRecorder {
        fn on_event(&mut self, event: &ModuleEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn recording_subscriber_sees_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(SharedRecorder(seen.clone())));

        let events = vec![
            ModuleEvent::RestrictionLifted { current_block: 10, restriction_end_block: 10 },
            ModuleEvent::ParticipantJailed { participant: "alice".into() },
        ];
        bus.publish_all(events.clone());

        assert_eq!(*seen.borrow(), events);
    }

    #[test]
    fn publish_reaches_every_subscriber() {
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(SharedRecorder(a.clone())));
        bus.subscribe(Box::new(SharedRecorder(b.clone())));

        bus.publish(&ModuleEvent::ParticipantUnjailed { participant: "bob".into() });

        assert_eq!(a.borrow().len(), 1);
        assert_eq!(b.borrow().len(), 1);
    }
}
