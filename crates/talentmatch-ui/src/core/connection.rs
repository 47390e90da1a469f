//! Reconnect state machine for the log stream.
//!
//! # Design
//! - Every connection attempt gets an id; callbacks from superseded attempts are ignored.
//! - An error issues at most one reconnect ticket, and only when none is pending.
//! - Starting a new attempt or disconnecting cancels the pending ticket, so a timer that
//!   fires late can never open a second stream.

/// Observable connection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No stream open and none being opened.
    #[default]
    Disconnected,
    /// A stream request is in flight.
    Connecting,
    /// The stream answered and is delivering frames.
    Connected,
}

impl ConnectionState {
    /// Whether frames are currently flowing.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Identifier of one connection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptId(u64);

/// Permission to reconnect once the delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectTicket {
    id: u64,
    /// Delay before the reconnect may run.
    pub delay_ms: u32,
    due_at_ms: u64,
}

/// Answer to a fired reconnect timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectDecision {
    /// Open a new stream now.
    Reconnect,
    /// Timer fired early; re-arm for the remaining milliseconds.
    Wait(u32),
    /// Ticket was cancelled or the stream is already back.
    Skip,
}

impl ReconnectTicket {
    /// Earliest timestamp (ms) at which the ticket may be redeemed.
    #[must_use]
    pub const fn due_at_ms(&self) -> u64 {
        self.due_at_ms
    }
}

/// Connection lifecycle bookkeeping, free of any timer or DOM types.
#[derive(Clone, Debug)]
pub struct ConnectionMachine {
    state: ConnectionState,
    delay_ms: u32,
    next_id: u64,
    active: Option<u64>,
    pending: Option<u64>,
}

impl ConnectionMachine {
    /// Build a machine that schedules reconnects after `delay_ms`.
    #[must_use]
    pub const fn new(delay_ms: u32) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            delay_ms,
            next_id: 0,
            active: None,
            pending: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether a reconnect ticket is outstanding.
    #[must_use]
    pub const fn has_pending_reconnect(&self) -> bool {
        self.pending.is_some()
    }

    fn next(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    /// Start a new attempt, superseding the previous one and any pending reconnect.
    pub fn begin_connect(&mut self) -> AttemptId {
        let id = self.next();
        self.active = Some(id);
        self.pending = None;
        self.state = ConnectionState::Connecting;
        AttemptId(id)
    }

    /// Record a successful open. Returns `false` for superseded attempts.
    pub fn on_open(&mut self, attempt: AttemptId) -> bool {
        if self.active != Some(attempt.0) {
            return false;
        }
        self.state = ConnectionState::Connected;
        true
    }

    /// Record a stream failure and hand out a reconnect ticket when one is due.
    ///
    /// The attempt is finished after this call, so repeated errors from it are ignored.
    pub fn on_error(&mut self, attempt: AttemptId, now_ms: u64) -> Option<ReconnectTicket> {
        if self.active != Some(attempt.0) {
            return None;
        }
        self.active = None;
        self.state = ConnectionState::Disconnected;
        if self.pending.is_some() {
            return None;
        }
        let id = self.next();
        self.pending = Some(id);
        Some(ReconnectTicket {
            id,
            delay_ms: self.delay_ms,
            due_at_ms: now_ms.saturating_add(u64::from(self.delay_ms)),
        })
    }

    /// Redeem a ticket when its timer fires.
    ///
    /// The ticket is consumed when the answer is [`ReconnectDecision::Reconnect`] or
    /// [`ReconnectDecision::Skip`]; an early timer gets [`ReconnectDecision::Wait`] and
    /// keeps the ticket. A clock that reads earlier than the moment the ticket was
    /// issued counts as elapsed, so the wait never exceeds one delay.
    pub fn poll_reconnect(&mut self, ticket: ReconnectTicket, now_ms: u64) -> ReconnectDecision {
        if self.pending != Some(ticket.id) {
            return ReconnectDecision::Skip;
        }
        let issued_at_ms = ticket.due_at_ms.saturating_sub(u64::from(ticket.delay_ms));
        if (issued_at_ms..ticket.due_at_ms).contains(&now_ms) {
            let remaining = ticket.due_at_ms - now_ms;
            return ReconnectDecision::Wait(u32::try_from(remaining).unwrap_or(ticket.delay_ms));
        }
        self.pending = None;
        if self.state.is_connected() || self.active.is_some() {
            ReconnectDecision::Skip
        } else {
            ReconnectDecision::Reconnect
        }
    }

    /// Close everything: no active attempt, no pending reconnect.
    pub fn disconnect(&mut self) {
        self.active = None;
        self.pending = None;
        self.state = ConnectionState::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: u32 = 5_000;

    #[test]
    fn open_then_error_schedules_single_reconnect() {
        let mut machine = ConnectionMachine::new(DELAY);
        assert_eq!(machine.state(), ConnectionState::Disconnected);
        let attempt = machine.begin_connect();
        assert_eq!(machine.state(), ConnectionState::Connecting);
        assert!(machine.on_open(attempt));
        assert!(machine.state().is_connected());

        let ticket = machine.on_error(attempt, 1_000).unwrap();
        assert_eq!(ticket.delay_ms, DELAY);
        assert_eq!(ticket.due_at_ms(), 6_000);
        assert_eq!(machine.state(), ConnectionState::Disconnected);
        assert!(machine.on_error(attempt, 1_001).is_none());
    }

    #[test]
    fn reconnect_never_runs_before_delay() {
        let mut machine = ConnectionMachine::new(DELAY);
        let attempt = machine.begin_connect();
        let ticket = machine.on_error(attempt, 0).unwrap();
        assert_eq!(machine.poll_reconnect(ticket, 4_999), ReconnectDecision::Wait(1));
        assert!(machine.has_pending_reconnect());
        assert_eq!(machine.poll_reconnect(ticket, 5_000), ReconnectDecision::Reconnect);
        assert_eq!(machine.poll_reconnect(ticket, 5_001), ReconnectDecision::Skip);
    }

    #[test]
    fn clock_running_backwards_reconnects_instead_of_stalling() {
        let mut machine = ConnectionMachine::new(DELAY);
        let attempt = machine.begin_connect();
        let ticket = machine.on_error(attempt, 3_600_000).unwrap();
        assert_eq!(machine.poll_reconnect(ticket, 3_600_000), ReconnectDecision::Wait(DELAY));
        assert_eq!(machine.poll_reconnect(ticket, 0), ReconnectDecision::Reconnect);
        assert!(!machine.has_pending_reconnect());
    }

    #[test]
    fn manual_connect_cancels_pending_ticket() {
        let mut machine = ConnectionMachine::new(DELAY);
        let first = machine.begin_connect();
        let ticket = machine.on_error(first, 0).unwrap();
        let second = machine.begin_connect();
        assert!(!machine.has_pending_reconnect());
        assert_eq!(machine.poll_reconnect(ticket, 10_000), ReconnectDecision::Skip);
        assert!(machine.on_open(second));
    }

    #[test]
    fn superseded_attempts_are_ignored() {
        let mut machine = ConnectionMachine::new(DELAY);
        let first = machine.begin_connect();
        let second = machine.begin_connect();
        assert!(!machine.on_open(first));
        assert!(machine.on_error(first, 0).is_none());
        assert!(machine.on_open(second));
        assert!(machine.state().is_connected());
    }

    #[test]
    fn ticket_is_rejected_once_reconnected() {
        let mut machine = ConnectionMachine::new(DELAY);
        let attempt = machine.begin_connect();
        let ticket = machine.on_error(attempt, 0).unwrap();
        let next = machine.begin_connect();
        machine.on_open(next);
        assert_eq!(machine.poll_reconnect(ticket, 6_000), ReconnectDecision::Skip);
        assert!(machine.state().is_connected());
    }

    #[test]
    fn disconnect_cancels_pending_and_active() {
        let mut machine = ConnectionMachine::new(DELAY);
        let attempt = machine.begin_connect();
        let ticket = machine.on_error(attempt, 0).unwrap();
        machine.disconnect();
        assert_eq!(machine.poll_reconnect(ticket, 6_000), ReconnectDecision::Skip);

        let attempt = machine.begin_connect();
        machine.disconnect();
        assert!(!machine.on_open(attempt));
        assert_eq!(machine.state(), ConnectionState::Disconnected);
    }
}
