//! The read-decode-publish loop.
//!
//! An [`EegBridge`] owns one device link and one session transport for the
//! length of a single run. Bytes read from the link are fed to a
//! [`ThinkGearStreamDecoder`]; each sample it yields is published as an
//! `eeg:data` message, in decode order, with no retry and no queue.

use crate::{
    BridgeConfig, BridgeConnector, BridgeError, BridgeState, DefaultConnector, DeviceLink,
    SessionMessage, SessionTransport,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;
use thinkgear::Sample;
use thinkgear::frame::{DecoderStats, ThinkGearStreamDecoder};
use thinkgear::utils::now_iso8601;

type StateChangeHandler = Box<dyn Fn(BridgeState) + Send + Sync>;

/// Stops a running bridge from another task.
///
/// A pending connect is abandoned immediately. The loop checks the flag once
/// per iteration, so it exits after the current read and publish complete.
#[derive(Debug, Clone)]
pub struct BridgeStopHandle {
    running: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl BridgeStopHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Resolves once `stop` has been called.
    pub async fn stopped(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent `stop` is not missed.
            notified.as_mut().enable();

            if !self.is_running() {
                return;
            }

            notified.await;
        }
    }
}

pub struct EegBridge<C: BridgeConnector = DefaultConnector> {
    config: BridgeConfig,
    connector: C,
    decoder: ThinkGearStreamDecoder,
    // Shared with the blocking pool while a read is in flight.
    device: Option<Arc<Mutex<C::Device>>>,
    transport: Option<C::Transport>,
    stop: BridgeStopHandle,
    state: BridgeState,
    state_change_handler: Option<StateChangeHandler>,
}

impl EegBridge<DefaultConnector> {
    /// Creates a bridge using the serial port and WebSocket adapters.
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_connector(config, DefaultConnector)
    }
}

impl<C: BridgeConnector> EegBridge<C> {
    pub fn with_connector(config: BridgeConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            decoder: ThinkGearStreamDecoder::new(),
            device: None,
            transport: None,
            stop: BridgeStopHandle::new(),
            state: BridgeState::Idle,
            state_change_handler: None,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Registers a callback invoked on every state transition.
    pub fn set_state_change_handler(
        &mut self,
        handler: impl Fn(BridgeState) + Send + Sync + 'static,
    ) {
        self.state_change_handler = Some(Box::new(handler));
    }

    pub fn stop_handle(&self) -> BridgeStopHandle {
        self.stop.clone()
    }

    /// Abandons a pending connect, or asks the loop to exit after its
    /// current iteration.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn decoder_stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    fn set_state(&mut self, state: BridgeState) {
        if self.state == state {
            return;
        }

        tracing::info!("Bridge state {:?} -> {:?}", self.state, state);
        self.state = state;

        if let Some(handler) = &self.state_change_handler {
            handler(state);
        }
    }

    /// Connects both ends, pumps samples until stopped, then tears down.
    ///
    /// A connection failure is returned after cleanup has run; nothing is
    /// retried. A stop while connecting abandons the connect, cleans up and
    /// returns `Ok(())`. Once the loop is running, read and publish failures
    /// are only logged, so a stopped run returns `Ok(())`.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        if self.state != BridgeState::Idle {
            return Err(BridgeError::NotIdle(self.state));
        }

        let stop = self.stop.clone();
        let connect = async {
            self.set_state(BridgeState::ConnectingDevice);
            self.connect_device().await?;

            self.set_state(BridgeState::ConnectingSession);
            self.connect_session().await
        };

        // A connect that is already complete wins over a pending stop.
        let connected = tokio::select! {
            biased;
            result = connect => Some(result),
            () = stop.stopped() => None,
        };

        match connected {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                tracing::error!("{}", e);
                self.cleanup().await;
                return Err(e);
            }
            None => {
                tracing::info!("Bridge stopped while connecting");
                self.cleanup().await;
                return Ok(());
            }
        }

        self.set_state(BridgeState::Running);
        tracing::info!(
            "Bridge started: reading {} and publishing to {}",
            self.config.device.port,
            self.config.session_url
        );

        self.run_loop().await;

        self.set_state(BridgeState::Stopping);
        self.cleanup().await;

        Ok(())
    }

    /// Opens the device link.
    pub async fn connect_device(&mut self) -> Result<(), BridgeError> {
        let device = self.connector.open_device(&self.config.device).await?;
        tracing::info!("Connected to device on {}", self.config.device.port);

        self.device = Some(Arc::new(Mutex::new(device)));
        Ok(())
    }

    /// Opens the session transport and announces the student.
    ///
    /// The transport is kept even if the join message fails, so cleanup
    /// still closes it.
    pub async fn connect_session(&mut self) -> Result<(), BridgeError> {
        let transport = self
            .connector
            .open_transport(&self.config.session_url)
            .await?;
        let transport = self.transport.insert(transport);

        transport
            .send(&SessionMessage::join(&self.config.identity))
            .await
    }

    /// Runs read-decode-publish iterations until stopped.
    pub async fn run_loop(&mut self) {
        while self.stop.is_running() {
            let bytes = self.read_device().await;

            if !bytes.is_empty() {
                if let Some(sample) = self.decoder.feed(&bytes) {
                    self.publish_sample(&sample).await;
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Reads one chunk on the blocking pool. Failures count as an empty read.
    async fn read_device(&mut self) -> Vec<u8> {
        let Some(device) = self.device.clone() else {
            return Vec::new();
        };
        let max_bytes = self.config.read_chunk_size;

        let result = tokio::task::spawn_blocking(move || {
            device
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .read(max_bytes)
        })
        .await
        .unwrap_or_else(|e| Err(io::Error::other(e)));

        result.unwrap_or_else(|e| {
            tracing::error!("{}", BridgeError::Read(e));
            Vec::new()
        })
    }

    async fn publish_sample(&mut self, sample: &Sample) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        let message = SessionMessage::eeg_data(&self.config.identity, sample, now_iso8601());

        match transport.send(&message).await {
            Ok(()) => tracing::debug!(
                "Sample sent: attention={:?} relaxation={:?} signal_quality={:?}",
                sample.attention,
                sample.relaxation,
                sample.signal_quality
            ),
            Err(e) => tracing::error!("{}", e),
        }
    }

    /// Leaves the session and releases both resources.
    ///
    /// Each step is attempted regardless of whether the previous one failed.
    pub async fn cleanup(&mut self) {
        self.stop.running.store(false, Ordering::SeqCst);

        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport
                .send(&SessionMessage::leave(&self.config.identity))
                .await
            {
                tracing::warn!("{}", e);
            }

            match transport.close().await {
                Ok(()) => tracing::info!("Session transport disconnected"),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if let Some(device) = self.device.take() {
            let result = device
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .close();

            if let Err(e) = result {
                tracing::warn!(
                    "{}",
                    BridgeError::Close {
                        resource: "device link",
                        source: Box::new(e),
                    }
                );
            }
        }

        self.set_state(BridgeState::Closed);
    }
}
