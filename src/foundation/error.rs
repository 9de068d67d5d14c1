/// Crate-wide result alias.
pub type MorphResult<T> = Result<T, MorphError>;

/// Coarse error classes used when reporting job failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data is unusable (counts, sizes, frame counts).
    Input,
    /// The point set cannot be triangulated.
    Geometry,
    /// A triangle references a landmark that does not exist.
    Index,
    /// An upstream detector or downstream encoder failed.
    Collaborator,
}

/// Errors produced by the morph engine and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Fewer than three points were handed to the triangulator.
    #[error("input error: triangulation needs at least 3 points, got {found}")]
    InsufficientPoints {
        /// Number of points supplied.
        found: usize,
    },

    /// Source and destination landmark sets differ in length.
    #[error("input error: landmark count mismatch (source {source_len}, dest {dest_len})")]
    LandmarkCountMismatch {
        /// Source set length.
        source_len: usize,
        /// Destination set length.
        dest_len: usize,
    },

    /// A sequence needs at least the two endpoint frames.
    #[error("input error: frame count must be >= 2, got {frames}")]
    InvalidFrameCount {
        /// Requested frame count.
        frames: u64,
    },

    /// Source and destination rasters differ in size.
    #[error("input error: image size mismatch (source {src_w}x{src_h}, dest {dst_w}x{dst_h})")]
    ImageSizeMismatch {
        /// Source width.
        src_w: u32,
        /// Source height.
        src_h: u32,
        /// Destination width.
        dst_w: u32,
        /// Destination height.
        dst_h: u32,
    },

    /// Any other invalid input.
    #[error("input error: {0}")]
    Input(String),

    /// Every reference point lies on one line.
    #[error("geometry error: all points are collinear, no triangle can be formed")]
    DegenerateInput,

    /// Any other geometric failure.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// A triangle index points past the end of a landmark set.
    #[error("index error: landmark index {index} out of range for set of {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Landmark set length.
        len: usize,
    },

    /// Any other index bookkeeping failure.
    #[error("index error: {0}")]
    Index(String),

    /// The landmark detector found no face.
    #[error("no landmarks found: {0}")]
    NoLandmarks(String),

    /// The frame sink failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Propagated failure with context (I/O, image decoding).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`MorphError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`MorphError::Index`] value.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Build a [`MorphError::NoLandmarks`] value.
    pub fn no_landmarks(msg: impl Into<String>) -> Self {
        Self::NoLandmarks(msg.into())
    }

    /// Build a [`MorphError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Map this error onto the job-level taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientPoints { .. }
            | Self::LandmarkCountMismatch { .. }
            | Self::InvalidFrameCount { .. }
            | Self::ImageSizeMismatch { .. }
            | Self::Input(_) => ErrorKind::Input,
            Self::DegenerateInput | Self::Geometry(_) => ErrorKind::Geometry,
            Self::IndexOutOfRange { .. } | Self::Index(_) => ErrorKind::Index,
            Self::NoLandmarks(_) | Self::Encode(_) | Self::Other(_) => ErrorKind::Collaborator,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
