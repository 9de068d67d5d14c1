//! Per-image landmark sets and the detector seam that produces them.

/// Detector trait and the JSON-file detector.
pub mod detector;
/// Landmark set type and boundary anchors.
pub mod set;
