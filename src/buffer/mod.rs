//! Pixel data exchanged between the partitioner, scorers and assembler

/// Pixel buffer and channel layout types
pub mod pixel;

pub use pixel::{ChannelMode, PixelBuffer};
