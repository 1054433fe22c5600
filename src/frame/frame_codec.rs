use crate::{
    EegBandPowers, Sample,
    constants::{
        EEG_POWER_BAND_SIZE, EEG_POWER_BLOCK_SIZE, FRAME_OVERHEAD, FRAME_SYNC_BYTE,
        SIGNAL_QUALITY_CEILING,
    },
    frame::{FrameEncodeError, PayloadCode},
};

/// Provides encoding and decoding functionality for ThinkGear frames.
///
/// The `FrameCodec` owns the byte-level rules of the protocol: how a payload
/// is wrapped with sync bytes, length and checksum, and how a validated
/// payload is walked to extract its tagged fields. It holds no state; the
/// buffering and resynchronization live in
/// [`ThinkGearStreamDecoder`](crate::frame::ThinkGearStreamDecoder).
pub struct FrameCodec;

impl FrameCodec {
    /// Computes the checksum of a payload.
    ///
    /// The checksum is the one's complement of the low byte of the sum of all
    /// payload bytes.
    pub fn checksum(payload: &[u8]) -> u8 {
        !payload.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
    }

    /// Wraps a payload into a complete frame.
    ///
    /// # Returns
    ///
    /// The encoded frame bytes, or `FrameEncodeError::PayloadTooLarge` if the
    /// payload length does not fit in the one-byte length field.
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>, FrameEncodeError> {
        let length =
            u8::try_from(payload.len()).map_err(|_| FrameEncodeError::PayloadTooLarge(payload.len()))?;

        let mut buf = Vec::with_capacity(FRAME_OVERHEAD + payload.len());
        buf.push(FRAME_SYNC_BYTE);
        buf.push(FRAME_SYNC_BYTE);
        buf.push(length);
        buf.extend_from_slice(payload);
        buf.push(Self::checksum(payload));

        Ok(buf)
    }

    /// Walks a validated payload and collects the fields it carries.
    ///
    /// The returned `Sample` only has the fields present in this payload set;
    /// merging into cumulative state is the caller's job.
    ///
    /// Single-byte codes whose value byte is missing (payload ends right after
    /// the code) are recorded as `0`. EEG power blocks that do not declare
    /// exactly 24 bytes are skipped by their declared length.
    ///
    /// Unrecognized codes are assumed to carry exactly one value byte. An
    /// unknown code that is actually length-prefixed will misalign the rest of
    /// the walk for this payload; later frames are unaffected.
    pub fn decode_payload(payload: &[u8]) -> Sample {
        let mut update = Sample::default();
        let mut i = 0;

        while i < payload.len() {
            let code = payload[i];
            i += 1;

            let Ok(kind) = PayloadCode::try_from(code) else {
                tracing::debug!("Skipping unknown payload code 0x{:02X}", code);
                i += 1;
                continue;
            };

            if kind.is_length_prefixed() {
                let length = payload.get(i).copied().unwrap_or(0) as usize;
                i += 1;

                if kind == PayloadCode::EegPower && length == EEG_POWER_BLOCK_SIZE {
                    if let Some(block) = payload.get(i..i + EEG_POWER_BLOCK_SIZE) {
                        update.band_powers = Some(Self::decode_band_powers(block));
                    }
                }

                i += length;
                continue;
            }

            let value = payload.get(i).copied();
            i += 1;

            match kind {
                PayloadCode::PoorSignal => {
                    update.signal_quality =
                        Some(value.map_or(0, |v| SIGNAL_QUALITY_CEILING - i16::from(v)));
                }
                PayloadCode::Attention => update.attention = Some(value.unwrap_or(0)),
                PayloadCode::Meditation => update.relaxation = Some(value.unwrap_or(0)),
                PayloadCode::BlinkStrength => update.blink_strength = Some(value.unwrap_or(0)),
                PayloadCode::RawWave | PayloadCode::EegPower => {}
            }
        }

        update
    }

    /// Decodes eight consecutive big-endian 24-bit band values.
    ///
    /// `block` must be exactly `EEG_POWER_BLOCK_SIZE` bytes.
    fn decode_band_powers(block: &[u8]) -> EegBandPowers {
        let band = |index: usize| {
            let offset = index * EEG_POWER_BAND_SIZE;
            (u32::from(block[offset]) << 16)
                | (u32::from(block[offset + 1]) << 8)
                | u32::from(block[offset + 2])
        };

        EegBandPowers {
            delta: band(0),
            theta: band(1),
            low_alpha: band(2),
            high_alpha: band(3),
            low_beta: band(4),
            high_beta: band(5),
            low_gamma: band(6),
            mid_gamma: band(7),
        }
    }
}
