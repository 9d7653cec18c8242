//! Subscriber lists for the notifications a [`Bot`] raises.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bot::Bot;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Token returned when subscribing, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

pub type UserJoinedHandler = dyn Fn(&Bot, &str) + Send + Sync;
pub type RaidStartedHandler = dyn Fn(&Bot, &str) + Send + Sync;
pub type MessageReceivedHandler = dyn Fn(&BotMessage<'_>) + Send + Sync;

/// An ordered list of callbacks for one kind of notification.
///
/// Handlers are invoked in the order they were subscribed.
pub struct EventHandlers<F: ?Sized> {
    handlers: Vec<(HandlerId, Box<F>)>,
}

impl<F: ?Sized> Default for EventHandlers<F> {
    fn default() -> Self {
        EventHandlers { handlers: Vec::new() }
    }
}

impl<F: ?Sized> EventHandlers<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<F>) -> HandlerId {
        let id = HandlerId::next();
        self.handlers.push((id, handler));
        id
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.handlers.iter().map(|(_, handler)| &**handler)
    }
}

impl<F: ?Sized> fmt::Debug for EventHandlers<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

/// The three notification kinds a bot exposes.
#[derive(Debug, Default)]
pub struct BotEvents {
    pub user_joined: EventHandlers<UserJoinedHandler>,
    pub raid_started: EventHandlers<RaidStartedHandler>,
    pub message_received: EventHandlers<MessageReceivedHandler>,
}

impl BotEvents {
    /// Removes the handler from whichever list holds it.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.user_joined.unsubscribe(id)
            || self.raid_started.unsubscribe(id)
            || self.message_received.unsubscribe(id)
    }

    pub fn clear(&mut self) {
        self.user_joined.clear();
        self.raid_started.clear();
        self.message_received.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.user_joined.len() + self.raid_started.len() + self.message_received.len()
    }
}

/// A chat message as seen by bot subscribers.
#[derive(Debug, Clone, Copy)]
pub struct BotMessage<'a> {
    pub username: &'a str,
    pub is_subscriber: bool,
    pub message: &'a str,
    pub bot: &'a Bot,
}
