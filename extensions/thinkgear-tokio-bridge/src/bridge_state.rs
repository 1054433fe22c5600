/// Lifecycle of a single bridge run.
///
/// ```text
/// Idle -> ConnectingDevice -> ConnectingSession -> Running -> Stopping -> Closed
/// ```
///
/// A connection failure in either connecting state jumps straight to
/// `Closed`. A bridge never leaves `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    ConnectingDevice,
    ConnectingSession,
    Running,
    Stopping,
    Closed,
}
