use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use crate::color::Rgba;

pub const COLOR_FOUND_NOTIFICATION: &str = "ColorSamplerDidFindColor";

/// Event sent to subscribers whenever a dominant color was computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorFound {
    pub name: &'static str,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ColorFound) + Send + Sync>;

#[derive(Default)]
pub struct Observers {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl Observers {
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ColorFound) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let length_before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != length_before
    }

    pub fn broadcast(&self, color: Rgba) {
        // listeners run without the lock held so they may (un)subscribe
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        let event = ColorFound {
            name: COLOR_FOUND_NOTIFICATION,
            color,
        };
        log::trace!("Broadcasting {} to {} listeners", color, listeners.len());
        for listener in listeners {
            listener(&event);
        }
    }
}
