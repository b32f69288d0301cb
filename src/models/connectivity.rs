use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Whether the remote recommendation service is treated as reachable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// No probe has completed yet
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl ConnectivityState {
    pub fn is_connected(self) -> bool {
        self == ConnectivityState::Connected
    }
}

impl Display for ConnectivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityState::Unknown => write!(f, "unknown"),
            ConnectivityState::Connected => write!(f, "connected"),
            ConnectivityState::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Immutable view of connectivity handed to each resolver call
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct ConnectivitySnapshot {
    pub state: ConnectivityState,
    /// When the state was last decided by a probe
    pub checked_at: Option<DateTime<Utc>>,
    /// Number of probe attempts made so far
    pub attempts: u32,
}

/// Why a recommendation is being computed locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The remote service was never reachable in this session
    NeverConnected,
    /// The service was reachable at probe time but this call failed
    ConnectedButCallFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_unknown() {
        let snapshot = ConnectivitySnapshot::default();
        assert_eq!(snapshot.state, ConnectivityState::Unknown);
        assert_eq!(snapshot.checked_at, None);
        assert_eq!(snapshot.attempts, 0);
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&ConnectivityState::Disconnected).unwrap();
        assert_eq!(json, "\"disconnected\"");
        assert!(ConnectivityState::Connected.is_connected());
        assert!(!ConnectivityState::Unknown.is_connected());
    }
}
