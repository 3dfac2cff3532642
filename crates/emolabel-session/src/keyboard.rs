//! Explicit keyboard subscriptions.
//!
//! The host forwards every key press to one [`KeyboardHub`], whatever
//! widget has focus. The hub resolves the key against each live
//! subscription's mode, newest first, and queues the command on the first
//! one that accepts it. Subscriptions unregister themselves on drop, so a
//! torn-down annotator can never receive input.

use emolabel_core::keymap::resolve;
use emolabel_core::{Command, KeyInput, LabelMode};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

type Queue = Rc<RefCell<VecDeque<Command>>>;

struct Subscriber {
    id: u64,
    mode: LabelMode,
    queue: Queue,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Routes key presses to the most recent matching subscription.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    inner: Rc<RefCell<HubInner>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `mode`.
    pub fn subscribe(&self, mode: LabelMode) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let queue: Queue = Rc::default();
        inner.subscribers.push(Subscriber {
            id,
            mode,
            queue: Rc::clone(&queue),
        });
        debug!(id, ?mode, "Keyboard subscription added");
        Subscription {
            id,
            mode,
            hub: Rc::downgrade(&self.inner),
            queue,
        }
    }

    /// Deliver a key press. Returns the command if some subscription took it.
    pub fn dispatch(&self, key: KeyInput) -> Option<Command> {
        let inner = self.inner.borrow();
        for subscriber in inner.subscribers.iter().rev() {
            if let Some(command) = resolve(subscriber.mode, key) {
                subscriber.queue.borrow_mut().push_back(command);
                trace!(id = subscriber.id, ?command, "Key dispatched");
                return Some(command);
            }
        }
        None
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// A live registration with a [`KeyboardHub`].
pub struct Subscription {
    id: u64,
    mode: LabelMode,
    hub: Weak<RefCell<HubInner>>,
    queue: Queue,
}

impl Subscription {
    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    /// Take every command queued since the last call, oldest first.
    pub fn drain(&self) -> Vec<Command> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().subscribers.retain(|s| s.id != self.id);
            debug!(id = self.id, "Keyboard subscription removed");
        }
    }
}
