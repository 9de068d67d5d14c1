//! facemorph turns two face photographs into a smooth morph sequence.
//!
//! A single Delaunay mesh is built over the averaged landmarks of both faces. Every frame
//! resolves that one topology against the source, destination, and interpolated landmark sets,
//! warps each triangle from both images, and cross-dissolves the results:
//!
//! - Load landmarks through a [`LandmarkDetector`] (for example [`LandmarkFile`])
//! - Build a [`MorphJob`] (validated eagerly)
//! - Iterate its [`MorphFrames`] or stream them into a [`FrameSink`] with [`render_to_sink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Job files.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Landmark sets and detectors.
pub mod landmarks;
/// Shared triangulation.
pub mod mesh;
/// Frames and sequencing.
pub mod render;
/// Triangle warping and blending.
pub mod warp;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect};
pub use crate::foundation::error::{ErrorKind, MorphError, MorphResult};

pub use crate::config::{ImageInput, MorphConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::landmarks::detector::{LandmarkDetector, LandmarkFile};
pub use crate::landmarks::set::{BOUNDARY_ANCHOR_COUNT, LandmarkSet, boundary_anchors};
pub use crate::mesh::delaunay::{
    InsertionStep, TriangulationObserver, triangulate, triangulate_observed,
};
pub use crate::mesh::overlay::{MeshAnimation, draw_mesh};
pub use crate::mesh::triangle::{Triangle, TriangleIndex, TriangleList, resolve};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{RenderThreading, render_to_sink};
pub use crate::render::sequencer::{MorphFrames, MorphJob};
pub use crate::warp::affine::solve_affine;
pub use crate::warp::compositor::{
    TriangleInstance, TrianglePatch, composite_triangle, render_patch,
};
pub use crate::warp::raster::PixelRect;
