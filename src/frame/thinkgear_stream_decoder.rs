use crate::Sample;
use crate::constants::{
    FRAME_LENGTH_OFFSET, FRAME_OVERHEAD, FRAME_PAYLOAD_OFFSET, FRAME_SYNC_BYTE, FRAME_SYNC_SIZE,
};
use crate::frame::{DecodedFrame, Frame, FrameCodec, FrameDecodeError};
use std::collections::VecDeque;

/// A resynchronizing frame decoder for the ThinkGear byte stream.
///
/// `ThinkGearStreamDecoder` accepts a continuous stream of bytes in chunks of
/// any size, including chunks that split a frame or contain several frames.
/// Incomplete frames stay buffered until the rest of their bytes arrive.
///
/// The decoder also owns the cumulative [`Sample`]: every valid frame's fields
/// are merged into it, and fields not carried by a frame keep their previous
/// value.
///
/// ### Behavior Summary:
/// - Bytes ahead of a `0xAA 0xAA` sync marker are dropped one at a time.
/// - A frame whose checksum fails is dropped whole and yields
///   `ChecksumMismatch`; scanning resumes right after it.
/// - Valid frames yield a `DecodedFrame`, even if their payload is empty.
pub struct ThinkGearStreamDecoder {
    buffer: Vec<u8>, // Holds partial frame data
    sample: Sample,  // Cumulative merged state
    stats: DecoderStats,
}

/// Running counters kept by the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames that passed checksum validation.
    pub frames_decoded: u64,
    pub checksum_failures: u64,
    /// Bytes dropped while searching for a sync marker.
    pub bytes_discarded: u64,
}

pub struct FrameDecoderIterator {
    queue: VecDeque<Result<DecodedFrame, FrameDecodeError>>,
}

impl Iterator for FrameDecoderIterator {
    type Item = Result<DecodedFrame, FrameDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl Default for ThinkGearStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThinkGearStreamDecoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            sample: Sample::default(),
            stats: DecoderStats::default(),
        }
    }

    /// Appends `chunk` and returns the cumulative sample if any frame in the
    /// buffer contributed at least one field.
    ///
    /// When several frames complete during one call, the returned sample
    /// reflects all of them. Checksum failures are logged and otherwise
    /// absorbed. An empty chunk is a no-op.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<Sample> {
        let mut latest = None;

        for result in self.read_bytes(chunk) {
            match result {
                Ok(decoded) if !decoded.update.is_empty() => latest = Some(decoded.sample),
                Ok(_) => {}
                Err(e) => tracing::warn!("Discarded frame: {}", e),
            }
        }

        latest
    }

    /// Reads new bytes and decodes every complete frame now in the buffer.
    ///
    /// Yields one item per complete frame, in stream order.
    pub fn read_bytes(&mut self, data: &[u8]) -> FrameDecoderIterator {
        let mut queue = VecDeque::new();

        if data.is_empty() {
            return FrameDecoderIterator { queue };
        }

        self.buffer.extend_from_slice(data);

        // Bytes before `offset` have been consumed; they are drained once the
        // scan is done rather than shifting the buffer for every byte.
        let mut offset = 0;

        while self.buffer.len() - offset >= FRAME_OVERHEAD {
            let window = &self.buffer[offset..];

            if window[..FRAME_SYNC_SIZE] != [FRAME_SYNC_BYTE; FRAME_SYNC_SIZE] {
                tracing::trace!("Dropping 0x{:02X} while searching for sync", window[0]);
                self.stats.bytes_discarded += 1;
                offset += 1;
                continue;
            }

            let length = window[FRAME_LENGTH_OFFSET] as usize;
            let total = FRAME_OVERHEAD + length;

            if window.len() < total {
                break;
            }

            let frame = Frame {
                payload: window[FRAME_PAYLOAD_OFFSET..total - 1].to_vec(),
                checksum: window[total - 1],
            };
            offset += total;

            if !frame.is_valid() {
                self.stats.checksum_failures += 1;
                queue.push_back(Err(FrameDecodeError::ChecksumMismatch {
                    expected: frame.computed_checksum(),
                    received: frame.checksum,
                }));
                continue;
            }

            let update = FrameCodec::decode_payload(&frame.payload);
            self.sample.merge(&update);
            self.stats.frames_decoded += 1;

            queue.push_back(Ok(DecodedFrame {
                inner: frame,
                update,
                sample: self.sample.clone(),
            }));
        }

        self.buffer.drain(..offset);

        FrameDecoderIterator { queue }
    }

    /// The cumulative state merged from every valid frame so far.
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Number of bytes held back waiting for the rest of a frame.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}
