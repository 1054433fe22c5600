#[derive(Debug, PartialEq)]
pub enum FrameEncodeError {
    /// The payload does not fit in the one-byte length field.
    PayloadTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameDecodeError {
    /// The trailing checksum byte disagrees with the payload.
    ///
    /// The frame's bytes have already been removed from the buffer; decoding
    /// resumes with whatever follows them.
    ChecksumMismatch { expected: u8, received: u8 },
}

impl std::fmt::Display for FrameDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameDecodeError::ChecksumMismatch { expected, received } => write!(
                f,
                "checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}"
            ),
        }
    }
}

impl std::error::Error for FrameDecodeError {}
