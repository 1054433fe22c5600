// Frame related constants
pub const FRAME_SYNC_BYTE: u8 = 0xAA;
pub const FRAME_SYNC_SIZE: usize = 2;
pub const FRAME_LENGTH_OFFSET: usize = 2;
pub const FRAME_PAYLOAD_OFFSET: usize = 3;

/// Bytes surrounding the payload: two sync bytes, the length byte and the
/// trailing checksum. A complete frame is `FRAME_OVERHEAD + length` bytes.
pub const FRAME_OVERHEAD: usize = 4;

// Payload codes
pub const CODE_POOR_SIGNAL: u8 = 0x02;
pub const CODE_ATTENTION: u8 = 0x04;
pub const CODE_MEDITATION: u8 = 0x05;
pub const CODE_BLINK_STRENGTH: u8 = 0x16;
pub const CODE_RAW_WAVE: u8 = 0x80;
pub const CODE_EEG_POWER: u8 = 0x83;

/// Signal quality is reported as "poor signal"; the stored value is
/// `SIGNAL_QUALITY_CEILING - byte`.
pub const SIGNAL_QUALITY_CEILING: i16 = 200;

/// Number of bands in an EEG power block.
pub const EEG_POWER_BAND_COUNT: usize = 8;

/// Width in bytes of a single big-endian band value.
pub const EEG_POWER_BAND_SIZE: usize = 3;

/// Expected value of the length byte following `CODE_EEG_POWER`.
/// Blocks declaring any other length are skipped without decoding.
pub const EEG_POWER_BLOCK_SIZE: usize = EEG_POWER_BAND_COUNT * EEG_POWER_BAND_SIZE; // 8 * 3 = 24
