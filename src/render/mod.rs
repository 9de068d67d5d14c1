//! Frame buffers, the morph sequencer, and sink-driving pipelines.

/// RGBA8 frame buffer.
pub mod frame;
/// Threaded rendering into frame sinks.
pub mod pipeline;
/// Morph jobs and their frame sequences.
pub mod sequencer;
