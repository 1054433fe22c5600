use crate::Sample;
use crate::frame::FrameCodec;

/// A single ThinkGear packet, stripped of its sync marker and length byte.
///
/// On the wire a frame is laid out as:
///
/// ```text
/// [0xAA][0xAA][LENGTH][PAYLOAD; LENGTH][CHECKSUM]
/// ```
///
/// A single frame is not necessarily a single chunk of data read from the
/// device link. Several frames, or fragments of one, may arrive together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The tagged payload bytes.
    ///
    /// The payload is a sequence of `code [length] value` entries. Most codes
    /// carry a single value byte; extended codes (`0x80` and above) carry an
    /// explicit length byte first.
    pub payload: Vec<u8>,

    /// Checksum byte as received from the device.
    pub checksum: u8,
}

impl Frame {
    /// Checksum computed locally over `payload`.
    pub fn computed_checksum(&self) -> u8 {
        FrameCodec::checksum(&self.payload)
    }

    /// Returns `true` if the received checksum matches the payload.
    pub fn is_valid(&self) -> bool {
        self.computed_checksum() == self.checksum
    }
}

/// A frame that passed checksum validation, along with what it contributed.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub inner: Frame,

    /// Only the fields carried by this frame.
    pub update: Sample,

    /// Cumulative decoder state after `update` was merged.
    pub sample: Sample,
}
