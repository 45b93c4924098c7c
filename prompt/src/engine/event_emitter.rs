// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

/// An event that can be published on an [`EventEmitter`]. Subscribers pick events by
/// kind, which is usually a fieldless mirror of the event enum generated with
/// [`strum_macros::EnumDiscriminants`].
pub trait Emittable {
    type Kind: Copy + Eq + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventEmitter::on()`] and [`EventEmitter::once()`], used to
/// unsubscribe with [`EventEmitter::off()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Subscribers get the event and mutable access to a context, which for prompts is the
/// [`crate::PromptCore`] they are attached to.
pub type EventHandler<E, C> = Box<dyn FnMut(&E, &mut C) + Send>;

struct Subscription<E: Emittable, C> {
    id: SubscriptionId,
    kind: E::Kind,
    once: bool,
    handler: EventHandler<E, C>,
}

/// Minimal typed publish / subscribe, scoped to a single owner.
///
/// - [`Self::emit()`] calls every subscriber for the event's kind synchronously, in
///   registration order.
/// - A [`Self::once()`] subscriber is removed after it has been invoked, so it still
///   receives the event it fires for.
/// - Handlers get `&mut C` but not the emitter, so the subscriber list can't change in
///   the middle of an emit.
pub struct EventEmitter<E: Emittable, C> {
    subscriptions: Vec<Subscription<E, C>>,
    next_id: usize,
}

impl<E: Emittable, C> Default for EventEmitter<E, C> {
    fn default() -> Self {
        Self {
            subscriptions: vec![],
            next_id: 0,
        }
    }
}

impl<E: Emittable, C> Debug for EventEmitter<E, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.subscriptions.iter().map(|it| it.kind).collect();
        f.debug_struct("EventEmitter")
            .field("subscriptions", &kinds)
            .finish()
    }
}

impl<E: Emittable, C> EventEmitter<E, C> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Subscribe until [`Self::off()`] or [`Self::clear()`] is called.
    pub fn on(
        &mut self,
        kind: E::Kind,
        handler: impl FnMut(&E, &mut C) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribe(kind, false, Box::new(handler))
    }

    /// Subscribe for the next event of this kind only.
    pub fn once(
        &mut self,
        kind: E::Kind,
        handler: impl FnMut(&E, &mut C) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribe(kind, true, Box::new(handler))
    }

    fn subscribe(
        &mut self,
        kind: E::Kind,
        once: bool,
        handler: EventHandler<E, C>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            once,
            handler,
        });
        id
    }

    /// Returns `false` if there was no such subscription (already removed, or a `once`
    /// subscriber that has fired).
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let count_before = self.subscriptions.len();
        self.subscriptions.retain(|it| it.id != id);
        self.subscriptions.len() != count_before
    }

    /// Returns how many subscribers were invoked.
    pub fn emit(&mut self, event: &E, context: &mut C) -> usize {
        let kind = event.kind();
        let mut invoked = 0;

        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|it| it.kind == kind)
        {
            (subscription.handler)(event, context);
            invoked += 1;
        }

        self.subscriptions
            .retain(|it| !(it.once && it.kind == kind));

        invoked
    }

    pub fn clear(&mut self) { self.subscriptions.clear(); }

    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.subscriptions
            .iter()
            .filter(|it| it.kind == kind)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.subscriptions.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    enum TestEvent {
        Ping(u8),
        Pong,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEventKind {
        Ping,
        Pong,
    }

    impl Emittable for TestEvent {
        type Kind = TestEventKind;

        fn kind(&self) -> TestEventKind {
            match self {
                TestEvent::Ping(_) => TestEventKind::Ping,
                TestEvent::Pong => TestEventKind::Pong,
            }
        }
    }

    type Log = Vec<String>;

    #[test]
    fn test_emit_in_registration_order() {
        let mut emitter = EventEmitter::<TestEvent, Log>::new();
        emitter.on(TestEventKind::Ping, |event, log: &mut Log| {
            log.push(format!("first {event:?}"));
        });
        emitter.on(TestEventKind::Ping, |_, log: &mut Log| log.push("second".into()));
        emitter.on(TestEventKind::Pong, |_, log: &mut Log| log.push("pong".into()));

        let mut log = Log::new();
        assert_eq!(emitter.emit(&TestEvent::Ping(7), &mut log), 2);
        assert_eq!(log, vec!["first Ping(7)".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_once_receives_event_then_is_removed() {
        let mut emitter = EventEmitter::<TestEvent, Log>::new();
        emitter.once(TestEventKind::Ping, |_, log: &mut Log| log.push("once".into()));
        emitter.on(TestEventKind::Ping, |_, log: &mut Log| log.push("on".into()));

        let mut log = Log::new();
        emitter.emit(&TestEvent::Ping(1), &mut log);
        emitter.emit(&TestEvent::Ping(2), &mut log);

        assert_eq!(log, vec!["once", "on", "on"]);
        assert_eq!(emitter.listener_count(TestEventKind::Ping), 1);
    }

    #[test]
    fn test_once_for_other_kind_survives() {
        let mut emitter = EventEmitter::<TestEvent, Log>::new();
        emitter.once(TestEventKind::Pong, |_, log: &mut Log| log.push("pong".into()));

        let mut log = Log::new();
        assert_eq!(emitter.emit(&TestEvent::Ping(1), &mut log), 0);
        assert_eq!(emitter.listener_count(TestEventKind::Pong), 1);
    }

    #[test]
    fn test_off_and_clear() {
        let mut emitter = EventEmitter::<TestEvent, Log>::new();
        let id = emitter.on(TestEventKind::Pong, |_, log: &mut Log| log.push("pong".into()));
        emitter.on(TestEventKind::Ping, |_, _| {});

        assert!(emitter.off(id));
        assert!(!emitter.off(id));

        let mut log = Log::new();
        emitter.emit(&TestEvent::Pong, &mut log);
        assert!(log.is_empty());

        emitter.clear();
        assert!(emitter.is_empty());
    }
}
