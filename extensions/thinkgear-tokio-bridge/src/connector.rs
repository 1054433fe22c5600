use crate::{
    BridgeError, DeviceConfig, DeviceLink, SerialDeviceLink, SessionTransport, WsSessionTransport,
};
use std::io;

/// Opens the two resources a bridge run owns.
///
/// This lets the bridge be driven by any device link and session transport,
/// e.g. scripted in-memory ones in tests.
#[async_trait::async_trait]
pub trait BridgeConnector: Send + Sync + 'static {
    type Device: DeviceLink;
    type Transport: SessionTransport + 'static;

    async fn open_device(&self, config: &DeviceConfig) -> Result<Self::Device, BridgeError>;

    async fn open_transport(&self, url: &str) -> Result<Self::Transport, BridgeError>;
}

/// Serial port device link and WebSocket session transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConnector;

#[async_trait::async_trait]
impl BridgeConnector for DefaultConnector {
    type Device = SerialDeviceLink;
    type Transport = WsSessionTransport;

    async fn open_device(&self, config: &DeviceConfig) -> Result<Self::Device, BridgeError> {
        // Opening a serial port blocks, so keep it off the async workers.
        let owned = config.clone();
        tokio::task::spawn_blocking(move || SerialDeviceLink::open(&owned))
            .await
            .map_err(|e| BridgeError::Link {
                port: config.port.clone(),
                source: io::Error::other(e),
            })?
    }

    async fn open_transport(&self, url: &str) -> Result<Self::Transport, BridgeError> {
        WsSessionTransport::connect(url).await
    }
}
