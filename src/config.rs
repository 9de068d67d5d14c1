//! On-disk morph job description.
//!
//! A job file names the two images, the landmark files produced for them, and the output
//! timing:
//!
//! ```json
//! {
//!   "source": { "image": "a.png", "landmarks": "a.json" },
//!   "dest":   { "image": "b.png", "landmarks": "b.json" },
//!   "fps": 25,
//!   "duration_secs": 5,
//!   "output": "out/morph.mp4"
//! }
//! ```
//!
//! Relative paths resolve against the directory holding the job file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::core::Fps;
use crate::foundation::error::{MorphError, MorphResult};
use crate::landmarks::detector::{LandmarkDetector, LandmarkFile};
use crate::landmarks::set::LandmarkSet;
use crate::render::pipeline::RenderThreading;
use crate::render::sequencer::MorphJob;

const DEFAULT_FPS: u32 = 25;
const DEFAULT_DURATION_SECS: f64 = 5.0;

/// One endpoint of the morph: an image and the landmark file detected on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageInput {
    /// Image path, relative to the job file.
    pub image: PathBuf,
    /// Landmark JSON path, relative to the job file.
    pub landmarks: PathBuf,
}

/// Parsed job file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MorphConfig {
    /// Face shown at alpha 0.
    pub source: ImageInput,
    /// Face shown at alpha 1.
    pub dest: ImageInput,
    /// Output frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Explicit frame count; wins over `duration_secs`.
    #[serde(default)]
    pub frames: Option<u64>,
    /// Sequence length in seconds, used when `frames` is absent.
    #[serde(default)]
    pub duration_secs: Option<f64>,
    /// Default MP4 output path.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Append the nine boundary anchors to each landmark file.
    #[serde(default = "default_anchors")]
    pub anchors: bool,
    /// Frame-level parallelism settings.
    #[serde(default)]
    pub threading: RenderThreading,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_anchors() -> bool {
    true
}

impl MorphConfig {
    /// Parse a job from JSON. Relative paths stay relative to the working directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> MorphResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MorphError::input(format!("parse morph job JSON: {e}")))
    }

    /// Parse a job file; relative paths inside resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> MorphResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MorphError::input(format!("open morph job JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    /// Check the job file before any image is loaded.
    pub fn validate(&self) -> MorphResult<()> {
        if self.fps == 0 {
            return Err(MorphError::input("fps must be > 0"));
        }
        if self.frames.is_some() && self.duration_secs.is_some() {
            return Err(MorphError::input(
                "set either 'frames' or 'duration_secs', not both",
            ));
        }
        if let Some(d) = self.duration_secs
            && !(d.is_finite() && d > 0.0)
        {
            return Err(MorphError::input(format!(
                "duration_secs must be finite and > 0, got {d}"
            )));
        }
        if let Some(0) = self.threading.threads {
            return Err(MorphError::input("threading.threads must be >= 1 when set"));
        }
        let frames = self.frame_count();
        if frames < 2 {
            return Err(MorphError::InvalidFrameCount { frames });
        }
        Ok(())
    }

    /// Frame rate as an [`Fps`].
    pub fn fps(&self) -> MorphResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// `frames` when given, otherwise `floor(duration_secs * fps)`.
    pub fn frame_count(&self) -> u64 {
        if let Some(n) = self.frames {
            return n;
        }
        let secs = self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS);
        match self.fps() {
            Ok(fps) => fps.secs_to_frames_floor(secs),
            Err(_) => 0,
        }
    }

    /// Resolve `p` against the job file's directory.
    pub fn resolve(&self, p: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }

    /// `output` resolved against the job file's directory.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_deref().map(|p| self.resolve(p))
    }

    /// Decode one endpoint image and read its landmarks.
    pub fn load_input(&self, input: &ImageInput) -> MorphResult<(RgbaImage, LandmarkSet)> {
        let image_path = self.resolve(&input.image);
        let image = image::open(&image_path)
            .with_context(|| format!("decode image '{}'", image_path.display()))?
            .to_rgba8();
        let detector = LandmarkFile::new(self.resolve(&input.landmarks)).with_anchors(self.anchors);
        let landmarks = detector.detect(&image)?;
        Ok((image, landmarks))
    }

    /// Validate, load both endpoints, and build the job.
    #[tracing::instrument(skip(self))]
    pub fn load_job(&self) -> MorphResult<MorphJob> {
        self.validate()?;
        let (src_img, src_lm) = self.load_input(&self.source)?;
        let (dst_img, dst_lm) = self.load_input(&self.dest)?;
        MorphJob::from_landmarks(src_img, dst_img, src_lm, dst_lm, self.frame_count())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
