//! Observable state holders
//!
//! A [`Signal`] is owned by exactly one component, which publishes new values
//! into it. Everyone else gets a [`ReadSignal`]: they can read the current value
//! or subscribe to changes, but not write.

use std::sync::Arc;
use tokio::sync::watch;

/// Writable observable value
pub struct Signal<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Publish a new value, returning the previous one.
    ///
    /// Subscribers are notified even when the value is equal to the old one.
    pub fn set(&self, value: T) -> T {
        self.sender.send_replace(value)
    }

    /// Publish only if the value differs from the current one
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Read-only handle for consumers
    pub fn reader(&self) -> ReadSignal<T> {
        ReadSignal {
            sender: Arc::clone(&self.sender),
        }
    }
}

/// Read-only view of a [`Signal`]
pub struct ReadSignal<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadSignal").field(&*self.sender.borrow()).finish()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&*self.sender.borrow()).finish()
    }
}
