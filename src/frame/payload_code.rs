use crate::constants::{
    CODE_ATTENTION, CODE_BLINK_STRENGTH, CODE_EEG_POWER, CODE_MEDITATION, CODE_POOR_SIGNAL,
    CODE_RAW_WAVE,
};
use std::convert::TryFrom;

/// Payload codes understood by the decoder.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCode {
    PoorSignal = CODE_POOR_SIGNAL,
    Attention = CODE_ATTENTION,
    Meditation = CODE_MEDITATION,
    BlinkStrength = CODE_BLINK_STRENGTH,
    RawWave = CODE_RAW_WAVE,
    EegPower = CODE_EEG_POWER,
}

impl PayloadCode {
    /// Whether the code is followed by an explicit length byte.
    pub fn is_length_prefixed(self) -> bool {
        matches!(self, PayloadCode::RawWave | PayloadCode::EegPower)
    }
}

impl TryFrom<u8> for PayloadCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            CODE_POOR_SIGNAL => Ok(PayloadCode::PoorSignal),
            CODE_ATTENTION => Ok(PayloadCode::Attention),
            CODE_MEDITATION => Ok(PayloadCode::Meditation),
            CODE_BLINK_STRENGTH => Ok(PayloadCode::BlinkStrength),
            CODE_RAW_WAVE => Ok(PayloadCode::RawWave),
            CODE_EEG_POWER => Ok(PayloadCode::EegPower),
            _ => Err(()),
        }
    }
}
