use crate::BridgeState;
use std::io;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the bridge and its adapters.
///
/// `Link` and `Transport` are fatal: they abort startup. The remaining
/// variants are recoverable and are only logged by the run loop.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The device link could not be opened.
    #[error("failed to open device link on {port}: {source}")]
    Link {
        port: String,
        #[source]
        source: io::Error,
    },

    /// The session transport could not be established.
    #[error("failed to connect session transport at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A message could not be delivered on the session transport.
    #[error("failed to publish `{event}`: {source}")]
    Publish {
        event: &'static str,
        #[source]
        source: BoxError,
    },

    /// A device read failed; the tick is treated as having no data.
    #[error("device read failed: {0}")]
    Read(#[source] io::Error),

    /// Closing the device link or the session transport failed.
    #[error("failed to close {resource}: {source}")]
    Close {
        resource: &'static str,
        #[source]
        source: BoxError,
    },

    /// `run` was called on a bridge that has already been started.
    #[error("bridge cannot start from state {0:?}")]
    NotIdle(BridgeState),
}
