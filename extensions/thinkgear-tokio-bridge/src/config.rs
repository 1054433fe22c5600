use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_POLL_INTERVAL, DEFAULT_READ_CHUNK_SIZE, DEFAULT_READ_TIMEOUT,
    DEFAULT_SERIAL_PORT, DEFAULT_SESSION_URL,
};
use std::time::Duration;

/// Correlates published samples with a student and a session.
///
/// Both identifiers are opaque and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub student_id: String,
    pub session_id: String,
}

impl SessionIdentity {
    pub fn new(student_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// How to open the device link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Serial port name (e.g. "/dev/rfcomm0" or "COM3").
    pub port: String,
    pub baud_rate: u32,
    /// Upper bound on a single blocking read.
    pub read_timeout: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Everything a bridge run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub device: DeviceConfig,
    /// WebSocket URL of the session server.
    pub session_url: String,
    pub identity: SessionIdentity,
    /// Maximum bytes requested per device read.
    pub read_chunk_size: usize,
    /// Delay between loop iterations.
    pub poll_interval: Duration,
}

impl BridgeConfig {
    /// Creates a configuration with default device and transport settings.
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            device: DeviceConfig::default(),
            session_url: DEFAULT_SESSION_URL.to_string(),
            identity,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_device(mut self, port: impl Into<String>, baud_rate: u32) -> Self {
        self.device.port = port.into();
        self.device.baud_rate = baud_rate;
        self
    }

    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.session_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
