// src/agent/session.rs

//! Explicit subscriptions to agent state and action events.
//!
//! The hub is single-threaded (`Rc`/`RefCell`, so `!Send`): events are published
//! one at a time and every callback runs to completion before the next one.
//! A [`Subscription`] removes its callback when dropped or unsubscribed, so the
//! caller controls lifetime instead of render order.

use crate::agent::ingest::{ingest, ReconciledState};
use crate::agent::projector::{project_state, StatusLine};
use crate::domain::LifecycleSignal;
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

/// One state snapshot published by a named agent.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEvent {
    pub agent: String,
    pub snapshot: Value,
    pub lifecycle: LifecycleSignal,
}

/// One action/tool-call event. Display only.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    pub name: String,
    pub arguments: Value,
    pub lifecycle: LifecycleSignal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionFilter {
    Any,
    Named(String),
}

impl ActionFilter {
    /// `"*"` matches every action.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "*" => ActionFilter::Any,
            other => ActionFilter::Named(other.to_string()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ActionFilter::Any => true,
            ActionFilter::Named(n) => n == name,
        }
    }
}

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    State,
    Action,
}

struct StateEntry {
    id: u64,
    agent: String,
    callback: Callback<StateEvent>,
}

struct ActionEntry {
    id: u64,
    filter: ActionFilter,
    callback: Callback<ActionEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    states: Vec<StateEntry>,
    actions: Vec<ActionEntry>,
}

impl Registry {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove(&mut self, channel: Channel, id: u64) {
        match channel {
            Channel::State => self.states.retain(|e| e.id != id),
            Channel::Action => self.actions.retain(|e| e.id != id),
        }
    }

    fn contains(&self, channel: Channel, id: u64) -> bool {
        match channel {
            Channel::State => self.states.iter().any(|e| e.id == id),
            Channel::Action => self.actions.iter().any(|e| e.id == id),
        }
    }
}

/// Fan-out point between the agent runtime and its subscribers.
#[derive(Clone, Default)]
pub struct AgentHub {
    registry: Rc<RefCell<Registry>>,
}

impl AgentHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_state<F>(&self, agent: impl Into<String>, callback: F) -> Subscription
    where
        F: FnMut(&StateEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();
        let callback: Callback<StateEvent> = Rc::new(RefCell::new(callback));
        registry.states.push(StateEntry {
            id,
            agent: agent.into(),
            callback,
        });

        self.subscription(Channel::State, id)
    }

    pub fn subscribe_actions<F>(&self, filter: ActionFilter, callback: F) -> Subscription
    where
        F: FnMut(&ActionEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();
        let callback: Callback<ActionEvent> = Rc::new(RefCell::new(callback));
        registry.actions.push(ActionEntry {
            id,
            filter,
            callback,
        });

        self.subscription(Channel::Action, id)
    }

    /// Delivers to every subscriber of `event.agent`. Returns how many ran.
    pub fn publish_state(&self, event: &StateEvent) -> usize {
        let targets: Vec<_> = self
            .registry
            .borrow()
            .states
            .iter()
            .filter(|e| e.agent == event.agent)
            .map(|e| Rc::clone(&e.callback))
            .collect();

        deliver(targets, event)
    }

    /// Delivers to every action subscriber whose filter matches. Returns how many ran.
    pub fn publish_action(&self, event: &ActionEvent) -> usize {
        let targets: Vec<_> = self
            .registry
            .borrow()
            .actions
            .iter()
            .filter(|e| e.filter.matches(&event.name))
            .map(|e| Rc::clone(&e.callback))
            .collect();

        deliver(targets, event)
    }

    pub fn subscriber_count(&self) -> usize {
        let registry = self.registry.borrow();
        registry.states.len() + registry.actions.len()
    }

    fn subscription(&self, channel: Channel, id: u64) -> Subscription {
        Subscription {
            id,
            channel,
            registry: Rc::downgrade(&self.registry),
        }
    }
}

// The registry borrow is released before any callback runs, so callbacks may
// subscribe, unsubscribe or publish. A callback that is already running is skipped.
fn deliver<E>(targets: Vec<Callback<E>>, event: &E) -> usize {
    let mut delivered = 0;

    for callback in targets {
        match callback.try_borrow_mut() {
            Ok(mut f) => {
                (&mut *f)(event);
                delivered += 1;
            }
            Err(_) => tracing::warn!("skipping re-entrant delivery to a running subscriber"),
        }
    }

    delivered
}

/// Handle for one registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes it immediately"]
pub struct Subscription {
    id: u64,
    channel: Channel,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = registry.borrow().contains(self.channel, self.id);
        active
    }

    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.channel, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .finish()
    }
}

/// What a session currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub state: ReconciledState,
    pub lifecycle: LifecycleSignal,
    pub status: StatusLine,
    /// Snapshots applied so far.
    pub updates: u64,
}

impl Default for SessionView {
    fn default() -> Self {
        let state = ReconciledState::default();
        let status = project_state(&state, LifecycleSignal::Idle);
        Self {
            state,
            lifecycle: LifecycleSignal::Idle,
            status,
            updates: 0,
        }
    }
}

/// A state subscription for one agent plus the latest state it produced.
///
/// Each snapshot fully replaces the previous view (last write wins).
pub struct AgentSession {
    view: Rc<RefCell<SessionView>>,
    subscription: Subscription,
}

impl AgentSession {
    pub fn attach(hub: &AgentHub, agent: impl Into<String>) -> Self {
        let view = Rc::new(RefCell::new(SessionView::default()));

        let slot = Rc::clone(&view);
        let subscription = hub.subscribe_state(agent, move |event| {
            let state = ingest(&event.snapshot);
            let status = project_state(&state, event.lifecycle);

            let mut view = slot.borrow_mut();
            let updates = view.updates + 1;
            *view = SessionView {
                state,
                lifecycle: event.lifecycle,
                status,
                updates,
            };
        });

        Self { view, subscription }
    }

    pub fn view(&self) -> Ref<'_, SessionView> {
        self.view.borrow()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Unsubscribes and hands back the last view.
    pub fn detach(self) -> SessionView {
        let AgentSession {
            view, subscription, ..
        } = self;
        subscription.unsubscribe();
        let last = view.borrow().clone();
        last
    }
}
