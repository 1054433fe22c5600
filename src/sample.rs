/// Eight band power magnitudes from a single EEG power block.
///
/// Each value is an unsigned 24-bit quantity widened to `u32`. The device
/// reports relative magnitudes with no unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EegBandPowers {
    pub delta: u32,
    pub theta: u32,
    pub low_alpha: u32,
    pub high_alpha: u32,
    pub low_beta: u32,
    pub high_beta: u32,
    pub low_gamma: u32,
    pub mid_gamma: u32,
}

impl EegBandPowers {
    /// Floor average of the low and high alpha bands.
    pub fn alpha(&self) -> u32 {
        floor_mean(self.low_alpha, self.high_alpha)
    }

    /// Floor average of the low and high beta bands.
    pub fn beta(&self) -> u32 {
        floor_mean(self.low_beta, self.high_beta)
    }

    /// Floor average of the low and mid gamma bands.
    pub fn gamma(&self) -> u32 {
        floor_mean(self.low_gamma, self.mid_gamma)
    }
}

// Band values are at most 24 bits wide, so the sum cannot overflow `u32`.
fn floor_mean(a: u32, b: u32) -> u32 {
    (a + b) / 2
}

/// Most recent value of every field decoded so far.
///
/// A `Sample` is used in two roles: as the partial update produced by a single
/// frame (only the fields that frame carried are `Some`), and as the
/// cumulative state held by the decoder, into which each update is merged.
/// Fields that a later frame does not carry keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    /// `200 - poor_signal_byte`. Higher is better; 200 means a clean contact.
    /// Signed because the device byte is not clamped to 200.
    pub signal_quality: Option<i16>,

    /// eSense attention, 0 to 100.
    pub attention: Option<u8>,

    /// eSense meditation, reported downstream as relaxation. 0 to 100.
    pub relaxation: Option<u8>,

    pub blink_strength: Option<u8>,

    pub band_powers: Option<EegBandPowers>,
}

impl Sample {
    /// Returns `true` if the sample holds no field.
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Number of fields holding a value.
    pub fn field_count(&self) -> usize {
        [
            self.signal_quality.is_some(),
            self.attention.is_some(),
            self.relaxation.is_some(),
            self.blink_strength.is_some(),
            self.band_powers.is_some(),
        ]
        .into_iter()
        .filter(|is_set| *is_set)
        .count()
    }

    /// Overwrites every field that `update` carries, leaving the rest intact.
    pub fn merge(&mut self, update: &Sample) {
        if update.signal_quality.is_some() {
            self.signal_quality = update.signal_quality;
        }
        if update.attention.is_some() {
            self.attention = update.attention;
        }
        if update.relaxation.is_some() {
            self.relaxation = update.relaxation;
        }
        if update.blink_strength.is_some() {
            self.blink_strength = update.blink_strength;
        }
        if update.band_powers.is_some() {
            self.band_powers = update.band_powers;
        }
    }
}
