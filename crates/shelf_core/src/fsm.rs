//! State Machine Runtime
//!
//! Flat, enum-driven state machines for interaction states (gesture tracking,
//! scroll phases). A state type describes its own transition table through
//! [`StateTransitions`]; [`StateMachine`] holds the current state and a bounded
//! transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Maximum number of transitions kept in the history
const HISTORY_LIMIT: usize = 32;

/// Trait for state types that know their own transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance over a [`StateTransitions`] state type
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    /// History of state transitions, oldest first
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in the given state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        tracing::trace!("state transition {:?} --{}--> {:?}", from, event, to);
        Some(to)
    }

    /// Force the machine into a state without consulting the transition table
    pub fn reset(&mut self, state: S) {
        self.current = state;
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
