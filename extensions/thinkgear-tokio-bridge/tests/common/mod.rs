#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thinkgear::frame::FrameCodec;
use thinkgear_tokio_bridge::{
    BoxError, BridgeConfig, BridgeConnector, BridgeError, DeviceConfig, DeviceLink,
    SessionIdentity, SessionMessage, SessionTransport,
};

/// Everything observable that the mocks record, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DeviceOpened,
    DeviceClosed,
    TransportOpened,
    Sent(SessionMessage),
    TransportClosed,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn frame(payload: &[u8]) -> Vec<u8> {
    FrameCodec::encode(payload).expect("payload fits in one frame")
}

pub fn identity() -> SessionIdentity {
    SessionIdentity::new("student-42", "session-7")
}

pub fn test_config() -> BridgeConfig {
    BridgeConfig::new(identity()).with_poll_interval(Duration::from_millis(1))
}

/// Waits (up to two seconds) until `condition` holds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}

/// Device link that replays a script of reads, then reports no data.
pub struct ScriptedDevice {
    reads: VecDeque<io::Result<Vec<u8>>>,
    events: EventLog,
    fail_close: bool,
}

impl ScriptedDevice {
    pub fn new(reads: Vec<io::Result<Vec<u8>>>, events: EventLog) -> Self {
        Self {
            reads: reads.into(),
            events,
            fail_close: false,
        }
    }
}

impl DeviceLink for ScriptedDevice {
    fn read(&mut self, _max_bytes: usize) -> io::Result<Vec<u8>> {
        match self.reads.pop_front() {
            Some(read) => read,
            None => {
                std::thread::sleep(Duration::from_millis(1));
                Ok(Vec::new())
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.events.lock().unwrap().push(Event::DeviceClosed);
        if self.fail_close {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "port vanished"));
        }
        Ok(())
    }
}

/// Transport that records every message and can be told to fail.
///
/// Close attempts are recorded even when they fail.
pub struct RecordingTransport {
    events: EventLog,
    failing_eeg_sends: usize,
    fail_join: bool,
    fail_leave: bool,
    fail_close: bool,
}

#[async_trait::async_trait]
impl SessionTransport for RecordingTransport {
    async fn send(&mut self, message: &SessionMessage) -> Result<(), BridgeError> {
        let event = message.event_name();
        let should_fail = match message {
            SessionMessage::EegData(_) if self.failing_eeg_sends > 0 => {
                self.failing_eeg_sends -= 1;
                true
            }
            SessionMessage::StudentJoin(_) => self.fail_join,
            SessionMessage::StudentLeave(_) => self.fail_leave,
            _ => false,
        };

        if should_fail {
            let source: BoxError = "connection reset".into();
            return Err(BridgeError::Publish { event, source });
        }

        self.events
            .lock()
            .unwrap()
            .push(Event::Sent(message.clone()));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BridgeError> {
        self.events.lock().unwrap().push(Event::TransportClosed);
        if self.fail_close {
            return Err(BridgeError::Close {
                resource: "session transport",
                source: "close frame rejected".into(),
            });
        }
        Ok(())
    }
}

/// Connector handing out one scripted device and one recording transport.
#[derive(Default)]
pub struct MockConnector {
    pub events: EventLog,
    pub reads: Mutex<VecDeque<io::Result<Vec<u8>>>>,
    pub device_fails: bool,
    pub device_hangs: bool,
    pub transport_fails: bool,
    pub transport_hangs: bool,
    pub failing_eeg_sends: usize,
    pub fail_join: bool,
    pub fail_leave: bool,
    pub fail_transport_close: bool,
    pub fail_device_close: bool,
}

impl MockConnector {
    pub fn with_reads(reads: Vec<io::Result<Vec<u8>>>) -> Self {
        Self {
            reads: Mutex::new(reads.into()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> EventLog {
        self.events.clone()
    }
}

#[async_trait::async_trait]
impl BridgeConnector for MockConnector {
    type Device = ScriptedDevice;
    type Transport = RecordingTransport;

    async fn open_device(&self, config: &DeviceConfig) -> Result<Self::Device, BridgeError> {
        if self.device_hangs {
            std::future::pending::<()>().await;
        }

        if self.device_fails {
            return Err(BridgeError::Link {
                port: config.port.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such device"),
            });
        }

        self.events.lock().unwrap().push(Event::DeviceOpened);
        Ok(ScriptedDevice {
            reads: std::mem::take(&mut *self.reads.lock().unwrap()),
            events: self.events.clone(),
            fail_close: self.fail_device_close,
        })
    }

    async fn open_transport(&self, url: &str) -> Result<Self::Transport, BridgeError> {
        if self.transport_hangs {
            // A server that accepts the connection but never completes the handshake.
            std::future::pending::<()>().await;
        }

        if self.transport_fails {
            let source: BoxError = "connection refused".into();
            return Err(BridgeError::Transport {
                url: url.to_string(),
                source,
            });
        }

        self.events.lock().unwrap().push(Event::TransportOpened);
        Ok(RecordingTransport {
            events: self.events.clone(),
            failing_eeg_sends: self.failing_eeg_sends,
            fail_join: self.fail_join,
            fail_leave: self.fail_leave,
            fail_close: self.fail_transport_close,
        })
    }
}

/// Messages sent so far, in order.
pub fn sent_messages(events: &EventLog) -> Vec<SessionMessage> {
    events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            Event::Sent(message) => Some(message.clone()),
            _ => None,
        })
        .collect()
}

pub fn eeg_messages(events: &EventLog) -> Vec<thinkgear_tokio_bridge::EegData> {
    sent_messages(events)
        .into_iter()
        .filter_map(|message| match message {
            SessionMessage::EegData(data) => Some(data),
            _ => None,
        })
        .collect()
}
