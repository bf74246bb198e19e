//! Host event queue.
//!
//! ```text
//! ┌──────────────┐      ┌─────────────┐      ┌──────────────┐
//! │ Host adapter │─────>│  EventBus   │─────>│ UiController │
//! │ (any thread) │      │  (bounded)  │      │    pump()    │
//! └──────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Adapters push raw [`UiEvent`]s from wherever the host delivers them;
//! the controller drains them on its own thread between clock advances.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::input::UiEvent;

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Bounded multi-producer event channel.
pub struct EventBus {
    sender: Sender<UiEvent>,
    receiver: Receiver<UiEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<UiEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or the controller is gone;
    /// the event is dropped.
    #[inline]
    pub fn send(&self, event: UiEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::debug!("Event queue full, dropped {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Sends an event, waiting for room.
    #[inline]
    pub fn send_blocking(&self, event: UiEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<UiEvent>,
}

impl EventReceiver {
    /// Takes every pending event (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<UiEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<UiEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if events are pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ClickTarget, Key, Modifiers};

    #[test]
    fn test_event_send_receive() {
        let (sender, receiver) = EventBus::create_pair(8);

        assert!(sender.send(UiEvent::Click(ClickTarget::SidebarToggle)));
        assert!(receiver.has_events());
        assert_eq!(
            receiver.try_recv(),
            Some(UiEvent::Click(ClickTarget::SidebarToggle))
        );
        assert_eq!(receiver.try_recv(), None);
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(2);
        let escape = UiEvent::KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::default(),
        };

        assert!(sender.send(escape.clone()));
        assert!(sender.send(escape.clone()));
        assert!(!sender.send(escape));
        assert_eq!(receiver.pending_count(), 2);
    }

    #[test]
    fn test_drain_from_other_thread() {
        let bus = EventBus::new(64);
        let sender = bus.sender();
        let receiver = bus.receiver();

        let producer = std::thread::spawn(move || {
            for i in 0..10u8 {
                sender.send_blocking(UiEvent::Scroll {
                    offset: f32::from(i),
                });
            }
        });
        producer.join().unwrap();

        let events = receiver.drain();
        assert_eq!(events.len(), 10);
        assert_eq!(events[9], UiEvent::Scroll { offset: 9.0 });
        assert!(!receiver.has_events());
    }
}
