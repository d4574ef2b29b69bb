//! Core data types for log analysis.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;

/// A single timestamped log line.
///
/// One event per well-formed input line; ordering follows file order,
/// not timestamp order.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

/// Traffic direction through the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// C->S - client to server
    ClientToServer,
    /// S->C - server to client
    ServerToClient,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::ClientToServer => write!(f, "Client->Server"),
            Direction::ServerToClient => write!(f, "Server->Client"),
        }
    }
}

/// Aggregate statistics over one client log.
#[derive(Debug, Clone, Default)]
pub struct ClientStats {
    /// Transmission events, retransmissions included.
    pub total_sent: u64,
    /// Distinct sequence numbers seen in SEND lines. A retransmitted
    /// message counts in `total_sent` each time but here once, so
    /// `total_sent >= sequences.len()` always holds.
    pub sequences: BTreeSet<u64>,
    pub total_acked: u64,
    pub total_failed: u64,
    pub total_timeouts: u64,
    /// Timeout count per retransmission attempt number.
    pub retransmissions: BTreeMap<u32, u64>,
}

impl ClientStats {
    /// ACKs received as a percentage of unique messages sent.
    /// None when no sequence numbers were observed.
    pub fn success_rate(&self) -> Option<f64> {
        if self.sequences.is_empty() {
            return None;
        }
        Some(self.total_acked as f64 / self.sequences.len() as f64 * 100.0)
    }
}

/// Aggregate statistics over one server log.
#[derive(Debug, Clone, Default)]
pub struct ServerStats {
    /// Payload-bearing RECV events, duplicates included.
    pub total_received: u64,
    /// Distinct sequence numbers across received data packets.
    pub unique_sequences: BTreeSet<u64>,
    pub total_acks_sent: u64,
}

/// Aggregate statistics over one proxy log.
///
/// Dropped/delayed counters are tracked independently of the
/// pass-through counters; the classifier does not cross-validate them.
#[derive(Debug, Clone, Default)]
pub struct ProxyStats {
    pub client_to_server: u64,
    pub server_to_client: u64,
    pub dropped_c2s: u64,
    pub dropped_s2c: u64,
    pub delayed_c2s: u64,
    pub delayed_s2c: u64,
    /// Delay magnitudes in milliseconds, in log order.
    pub delay_times_c2s: Vec<u64>,
    pub delay_times_s2c: Vec<u64>,
}

/// min/max/mean over one direction's observed delays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayStats {
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: f64,
}

impl ProxyStats {
    pub fn passed(&self, direction: Direction) -> u64 {
        match direction {
            Direction::ClientToServer => self.client_to_server,
            Direction::ServerToClient => self.server_to_client,
        }
    }

    pub fn dropped(&self, direction: Direction) -> u64 {
        match direction {
            Direction::ClientToServer => self.dropped_c2s,
            Direction::ServerToClient => self.dropped_s2c,
        }
    }

    pub fn delayed(&self, direction: Direction) -> u64 {
        match direction {
            Direction::ClientToServer => self.delayed_c2s,
            Direction::ServerToClient => self.delayed_s2c,
        }
    }

    /// Dropped packets as a percentage of packets received in that
    /// direction. None when nothing passed through.
    pub fn drop_rate(&self, direction: Direction) -> Option<f64> {
        let passed = self.passed(direction);
        if passed == 0 {
            return None;
        }
        Some(self.dropped(direction) as f64 / passed as f64 * 100.0)
    }

    /// Delay range and mean for one direction. None when no delays
    /// carried a millisecond magnitude.
    pub fn delay_stats(&self, direction: Direction) -> Option<DelayStats> {
        let times = match direction {
            Direction::ClientToServer => &self.delay_times_c2s,
            Direction::ServerToClient => &self.delay_times_s2c,
        };
        if times.is_empty() {
            return None;
        }
        let min_ms = *times.iter().min().expect("non-empty");
        let max_ms = *times.iter().max().expect("non-empty");
        let avg_ms = times.iter().sum::<u64>() as f64 / times.len() as f64;
        Some(DelayStats {
            min_ms,
            max_ms,
            avg_ms,
        })
    }
}
