//! The closed `Event` vocabulary and the subscription bus that fans events
//! out to hosts.

use crate::types::{GameOverReason, LineClearKind, PieceKind, TSpinKind};

/// An immutable, observable occurrence. Emitted in the order it occurs,
/// synchronously, within the `step`/`submit` call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started,
    Paused,
    Resumed,
    Ended {
        score: u64,
        level: u8,
        lines: u32,
        time_ms: u64,
    },
    Spawned {
        kind: PieceKind,
    },
    PieceLocked {
        kind: PieceKind,
        cells: [(i32, i32); 4],
    },
    LinesCleared {
        rows: Vec<usize>,
        kind: LineClearKind,
        tspin: TSpinKind,
        perfect_clear: bool,
        awarded: u64,
    },
    LevelUp {
        from: u8,
        to: u8,
    },
    Held {
        from: Option<PieceKind>,
        to: Option<PieceKind>,
    },
    GameOver {
        reason: GameOverReason,
    },
}

/// Single-producer, multi-consumer event fan-out. Handlers run
/// synchronously, in subscription order, and must not call back into
/// mutating engine methods — behaviour is undefined if they do.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn FnMut(&Event)>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Registers a handler. There is currently no way to unsubscribe;
    /// hosts that need that should gate their handler on their own flag.
    pub fn subscribe(&mut self, handler: impl FnMut(&Event) + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    pub(crate) fn publish(&mut self, event: Event) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_receive_events_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let log_clone = log.clone();
        bus.subscribe(move |event| log_clone.borrow_mut().push(format!("{event:?}")));

        bus.publish(Event::Started);
        bus.publish(Event::Spawned { kind: PieceKind::T });

        let recorded = log.borrow();
        assert_eq!(recorded.len(), 2);
        assert!(recorded[0].contains("Started"));
        assert!(recorded[1].contains("Spawned"));
    }

    #[test]
    fn multiple_subscribers_all_receive_the_same_event() {
        let count_a = Rc::new(RefCell::new(0));
        let count_b = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let a = count_a.clone();
        let b = count_b.clone();
        bus.subscribe(move |_| *a.borrow_mut() += 1);
        bus.subscribe(move |_| *b.borrow_mut() += 1);

        bus.publish(Event::Started);

        assert_eq!(*count_a.borrow(), 1);
        assert_eq!(*count_b.borrow(), 1);
    }
}
