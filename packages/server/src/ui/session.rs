//! Per-connection session state machine.
//!
//! Tracks one WebSocket connection through `Connected` (no name yet),
//! `Joined` (display name registered), and `Closed` (terminal). The state
//! machine owns no I/O; the handler drives it. `close()` hands out the held
//! display name at most once, so teardown runs exactly once even when a read
//! failure and a write failure race on the same connection.

use crate::domain::{ConnectionId, DisplayName};

/// Session lifecycle states
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    /// Transport established, no display name registered yet
    Connected,
    /// Display name registered
    Joined(DisplayName),
    /// Terminal state
    Closed,
}

/// State of a single WebSocket connection
#[derive(Debug)]
pub struct ConnectionSession {
    connection_id: ConnectionId,
    state: SessionState,
}

impl ConnectionSession {
    /// Create a new session in the `Connected` state
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            state: SessionState::Connected,
        }
    }

    /// The connection this session belongs to
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Whether the session has completed a join
    pub fn is_joined(&self) -> bool {
        matches!(self.state, SessionState::Joined(_))
    }

    /// The registered display name, if joined
    pub fn joined_name(&self) -> Option<&DisplayName> {
        match &self.state {
            SessionState::Joined(name) => Some(name),
            _ => None,
        }
    }

    /// Record a completed join
    ///
    /// Only the `Connected` state accepts this transition; returns `false`
    /// (and leaves the state untouched) otherwise.
    pub fn mark_joined(&mut self, name: DisplayName) -> bool {
        match self.state {
            SessionState::Connected => {
                self.state = SessionState::Joined(name);
                true
            }
            _ => false,
        }
    }

    /// Close the session and take the held display name
    ///
    /// Transitions any state to `Closed`. The display name is returned only
    /// on the first call from `Joined`; every later call returns `None`.
    pub fn close(&mut self) -> Option<DisplayName> {
        match std::mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Joined(name) => Some(name),
            _ => None,
        }
    }
}
