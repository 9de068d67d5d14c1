use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Deserialize;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::landmarks::set::LandmarkSet;

/// Upstream landmark source.
///
/// Implementations return the full set used by the engine (detector points followed by any
/// boundary anchors) or [`MorphError::NoLandmarks`] when no face is found.
pub trait LandmarkDetector {
    /// Landmarks for `image`, in the detector's fixed feature order.
    fn detect(&self, image: &RgbaImage) -> MorphResult<LandmarkSet>;
}

/// Detector backed by a JSON file of precomputed feature points.
///
/// Accepted shapes: `[[x, y], ...]`, `[{"x": .., "y": ..}, ...]`, or either of those under a
/// `"points"` key.
#[derive(Clone, Debug)]
pub struct LandmarkFile {
    path: PathBuf,
    anchors: bool,
}

impl LandmarkFile {
    /// Detector reading `path`, with boundary anchors enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            anchors: true,
        }
    }

    /// Toggle appending boundary anchors sized to the detected image.
    pub fn with_anchors(mut self, anchors: bool) -> Self {
        self.anchors = anchors;
        self
    }

    /// Landmark file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw feature points without anchors.
    pub fn read_points(&self) -> MorphResult<Vec<Point>> {
        let f = File::open(&self.path).map_err(|e| {
            MorphError::input(format!("open landmarks JSON '{}': {e}", self.path.display()))
        })?;
        parse_points(BufReader::new(f)).map_err(|e| match e {
            MorphError::Input(msg) => {
                MorphError::input(format!("landmarks '{}': {msg}", self.path.display()))
            }
            other => other,
        })
    }
}

impl LandmarkDetector for LandmarkFile {
    fn detect(&self, image: &RgbaImage) -> MorphResult<LandmarkSet> {
        let points = self.read_points()?;
        if points.is_empty() {
            return Err(MorphError::no_landmarks(format!(
                "'{}' contains no feature points",
                self.path.display()
            )));
        }
        for p in &points {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(MorphError::input(format!(
                    "landmarks '{}' contain a non-finite coordinate",
                    self.path.display()
                )));
            }
        }

        let set = LandmarkSet::new(points);
        let canvas = Canvas {
            width: image.width(),
            height: image.height(),
        };
        tracing::debug!(
            path = %self.path.display(),
            feature_points = set.len(),
            anchors = self.anchors,
            "loaded landmarks"
        );
        Ok(if self.anchors {
            set.with_anchors(canvas)
        } else {
            set
        })
    }
}

pub(crate) fn parse_points<R: std::io::Read>(r: R) -> MorphResult<Vec<Point>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PointRepr {
        Pair([f64; 2]),
        Obj { x: f64, y: f64 },
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        List(Vec<PointRepr>),
        Wrapped { points: Vec<PointRepr> },
    }

    let repr: Repr = serde_json::from_reader(r)
        .map_err(|e| MorphError::input(format!("parse landmarks JSON: {e}")))?;
    let list = match repr {
        Repr::List(l) | Repr::Wrapped { points: l } => l,
    };
    Ok(list
        .into_iter()
        .map(|p| match p {
            PointRepr::Pair([x, y]) | PointRepr::Obj { x, y } => Point::new(x, y),
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/detector.rs"]
mod tests;
