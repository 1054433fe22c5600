//! Streaming decoder for the ThinkGear serial protocol.
//!
//! Bytes arrive from the device link in arbitrary chunks. The
//! [`frame::ThinkGearStreamDecoder`] reassembles them into checksummed frames,
//! walks each frame's tagged payload and merges the fields into a cumulative
//! [`Sample`].

pub mod constants;
pub mod frame;
mod sample;
pub mod utils;

pub use sample::{EegBandPowers, Sample};
