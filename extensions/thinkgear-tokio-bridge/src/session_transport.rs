use crate::{BridgeError, SessionMessage};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message as WsMessage,
};

/// A persistent, message-oriented connection to the session server.
///
/// Implementations deliver each message once, with no retry and no queueing;
/// a failed `send` is reported to the caller and the message is gone.
#[async_trait::async_trait]
pub trait SessionTransport: Send {
    async fn send(&mut self, message: &SessionMessage) -> Result<(), BridgeError>;

    async fn close(&mut self) -> Result<(), BridgeError>;
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// `SessionTransport` over a WebSocket, one JSON text message per event.
pub struct WsSessionTransport {
    url: String,
    sink: WsSink,
    receive_task: JoinHandle<()>,
}

impl WsSessionTransport {
    /// Connects to `url`.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Transport` if the WebSocket handshake fails.
    pub async fn connect(url: &str) -> Result<Self, BridgeError> {
        tracing::info!("Connecting to session server {}", url);

        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|e| BridgeError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        let (sink, mut receiver) = ws_stream.split();

        // Inbound messages are not used, but the stream has to be polled so
        // pings get answered and a server-side close is noticed.
        let peer = url.to_string();
        let receive_task = tokio::spawn(async move {
            while let Some(msg) = receiver.next().await {
                match msg {
                    Ok(WsMessage::Text(text)) => {
                        tracing::debug!("Received from {}: {}", peer, text.as_str());
                    }
                    Ok(WsMessage::Close(_)) => {
                        tracing::info!("Session server {} initiated close.", peer);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Session server {} stream error: {}", peer, e);
                        break;
                    }
                }
            }
        });

        tracing::info!("Connected to session server {}", url);

        Ok(Self {
            url: url.to_string(),
            sink,
            receive_task,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl SessionTransport for WsSessionTransport {
    async fn send(&mut self, message: &SessionMessage) -> Result<(), BridgeError> {
        let event = message.event_name();
        let text = message.to_json().map_err(|e| BridgeError::Publish {
            event,
            source: Box::new(e),
        })?;

        self.sink
            .send(WsMessage::Text(text.into()))
            .await
            .map_err(|e| BridgeError::Publish {
                event,
                source: Box::new(e),
            })
    }

    async fn close(&mut self) -> Result<(), BridgeError> {
        let result = self.sink.close().await;
        self.receive_task.abort();

        result.map_err(|e| BridgeError::Close {
            resource: "session transport",
            source: Box::new(e),
        })
    }
}

impl Drop for WsSessionTransport {
    fn drop(&mut self) {
        self.receive_task.abort();
    }
}
