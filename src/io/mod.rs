//! File-level collaborators of the composition core

/// Command-line parsing and run orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// CSV pixel grid serialization
pub mod grid;
/// Image decoding, cropping, resizing and export
pub mod image;
/// Thumbnail library loading and generation
pub mod library;
/// Progress bars
pub mod progress;
