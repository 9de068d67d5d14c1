//! Shared mesh topology: index triangles, triangulation, and debug overlays.

/// Incremental Delaunay triangulation over landmark indices.
pub mod delaunay;
/// Mesh drawing and insertion animation.
pub mod overlay;
/// Index triangles and their resolved vertices.
pub mod triangle;
