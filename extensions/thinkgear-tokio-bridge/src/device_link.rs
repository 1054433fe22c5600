use crate::{BridgeError, DeviceConfig};
use std::io::{self, Read};

/// A byte-oriented source of raw device data.
///
/// Calls are blocking; the bridge runs them on Tokio's blocking pool. No
/// framing is assumed: any bytes returned are handed to the decoder as-is.
pub trait DeviceLink: Send + 'static {
    /// Reads up to `max_bytes`, waiting at most the link's read timeout.
    ///
    /// An empty vector means nothing arrived in time.
    fn read(&mut self, max_bytes: usize) -> io::Result<Vec<u8>>;

    /// Releases the underlying handle. Closing twice is not an error.
    fn close(&mut self) -> io::Result<()>;
}

/// Serial (or Bluetooth RFCOMM) connection to the headset.
pub struct SerialDeviceLink {
    port_name: String,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialDeviceLink {
    /// Opens the configured serial port.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Link` if the port cannot be opened.
    pub fn open(config: &DeviceConfig) -> Result<Self, BridgeError> {
        tracing::info!(
            "Opening serial port {} at {} baud",
            config.port,
            config.baud_rate
        );

        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.read_timeout)
            .open()
            .map_err(|e| BridgeError::Link {
                port: config.port.clone(),
                source: e.into(),
            })?;

        Ok(Self {
            port_name: config.port.clone(),
            port: Some(port),
        })
    }

    /// List available serial ports
    #[must_use]
    pub fn list_ports() -> Vec<String> {
        serialport::available_ports()
            .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
            .unwrap_or_default()
    }
}

impl DeviceLink for SerialDeviceLink {
    fn read(&mut self, max_bytes: usize) -> io::Result<Vec<u8>> {
        let Some(port) = self.port.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                format!("serial port {} is closed", self.port_name),
            ));
        };

        let mut buf = vec![0u8; max_bytes];
        match port.read(&mut buf) {
            Ok(n) => {
                buf.truncate(n);
                Ok(buf)
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if self.port.take().is_some() {
            tracing::info!("Serial port {} closed", self.port_name);
        }
        Ok(())
    }
}
