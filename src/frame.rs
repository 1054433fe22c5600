mod frame_codec;
mod frame_error;
mod frame_struct;
mod payload_code;
mod thinkgear_stream_decoder;

pub use frame_codec::FrameCodec;
pub use frame_error::{FrameDecodeError, FrameEncodeError};
pub use frame_struct::{DecodedFrame, Frame};
pub use payload_code::PayloadCode;
pub use thinkgear_stream_decoder::{DecoderStats, FrameDecoderIterator, ThinkGearStreamDecoder};
