//! Frame sinks.
//!
//! Sinks consume composited frames in sequence order and are driven by
//! [`render_to_sink`](crate::render_to_sink).

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
