use tracing::trace;

/// Notification sent to subscribers after a state transition completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationEvent {
    Started { generation: u64 },
    Stopped { generation: u64 },
    Reset { generation: u64 },
    Changed { generation: u64 },
}

impl SimulationEvent {
    pub const fn generation(&self) -> u64 {
        match *self {
            SimulationEvent::Started { generation }
            | SimulationEvent::Stopped { generation }
            | SimulationEvent::Reset { generation }
            | SimulationEvent::Changed { generation } => generation,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SimulationEvent::Started { .. } => "started",
            SimulationEvent::Stopped { .. } => "stopped",
            SimulationEvent::Reset { .. } => "reset",
            SimulationEvent::Changed { .. } => "changed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SimulationEvent)>;

/// Synchronous fan-out to registered callbacks, in subscription order
#[derive(Default)]
pub(crate) struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: SimulationEvent) {
        trace!(
            event = event.name(),
            generation = event.generation(),
            listeners = self.listeners.len(),
            "Emit"
        );
        self.listeners.iter_mut().for_each(|(_, listener)| listener(&event));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |e: &SimulationEvent| seen.borrow_mut().push((tag, *e))));
        }

        bus.emit(SimulationEvent::Changed { generation: 3 });

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a", SimulationEvent::Changed { generation: 3 }),
                ("b", SimulationEvent::Changed { generation: 3 }),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::default();
        let c = Rc::clone(&count);
        let id = bus.subscribe(Box::new(move |_: &SimulationEvent| *c.borrow_mut() += 1));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(SimulationEvent::Reset { generation: 0 });

        assert_eq!(*count.borrow(), 0);
        assert_eq!(bus.len(), 0);
    }

    #[test]
    fn test_event_accessors() {
        let e = SimulationEvent::Stopped { generation: 12 };
        assert_eq!(e.generation(), 12);
        assert_eq!(e.name(), "stopped");
    }
}
