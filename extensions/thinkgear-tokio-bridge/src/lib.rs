mod bridge_state;
mod config;
mod connector;
pub mod constants;
mod device_link;
mod eeg_bridge;
mod error;
mod session_message;
mod session_transport;

pub use bridge_state::BridgeState;
pub use config::{BridgeConfig, DeviceConfig, SessionIdentity};
pub use connector::{BridgeConnector, DefaultConnector};
pub use device_link::{DeviceLink, SerialDeviceLink};
pub use eeg_bridge::{BridgeStopHandle, EegBridge};
pub use error::{BoxError, BridgeError};
pub use session_message::{EegData, SessionMessage, StudentJoin, StudentLeave};
pub use session_transport::{SessionTransport, WsSessionTransport};
