// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rollover::RolloverSummary;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Published after a write has been committed, never before.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    BalanceChanged { balance: Decimal },
    IncomingsChanged,
    AccountCreated { id: i64 },
    /// Name, limit or total spent of an account changed.
    AccountUpdated { id: i64 },
    AccountDeleted { id: i64 },
    RolloverCompleted(RolloverSummary),
}

pub trait Subscriber {
    fn on_event(&self, event: &DomainEvent);
}

impl<F> Subscriber for F
where
    F: Fn(&DomainEvent),
{
    fn on_event(&self, event: &DomainEvent) {
        self(event)
    }
}

/// Synchronous observer list. Subscribers are held weakly, so dropping a
/// service unsubscribes it.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Weak<dyn Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: Weak<dyn Subscriber>) {
        self.subscribers.borrow_mut().push(subscriber);
    }

    /// Subscribers may publish from inside `on_event`; the list is
    /// snapshotted before dispatch.
    pub fn publish(&self, event: DomainEvent) {
        let live: Vec<Rc<dyn Subscriber>> = {
            let mut subs = self.subscribers.borrow_mut();
            subs.retain(|s| s.strong_count() > 0);
            subs.iter().filter_map(Weak::upgrade).collect()
        };
        for sub in live {
            sub.on_event(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_subscribers_stop_receiving() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub: Rc<dyn Subscriber> = Rc::new(move |e: &DomainEvent| sink.borrow_mut().push(e.clone()));
        bus.subscribe(Rc::downgrade(&sub));

        bus.publish(DomainEvent::IncomingsChanged);
        drop(sub);
        bus.publish(DomainEvent::AccountDeleted { id: 3 });

        assert_eq!(*seen.borrow(), vec![DomainEvent::IncomingsChanged]);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
