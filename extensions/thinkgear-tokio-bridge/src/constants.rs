use std::time::Duration;

pub const DEFAULT_SERIAL_PORT: &str = "COM3";

/// Baud rate of the ThinkGear serial profile.
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

pub const DEFAULT_SESSION_URL: &str = "ws://localhost:3001";

/// Upper bound on a single blocking device read.
///
/// Stopping the bridge waits for an in-flight read to return, so this also
/// bounds shutdown latency.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum number of bytes requested from the device link per loop iteration.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 256;

/// Delay between loop iterations, so an idle link does not spin.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);
