use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::frame::FrameRGBA;
use crate::render::sequencer::MorphJob;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Render every frame of `job` into `sink`, in order, and close it.
///
/// With `threading.parallel`, frames of each chunk are rendered concurrently on a dedicated rayon
/// pool and then pushed in sequence order. Returns the number of frames pushed.
#[tracing::instrument(skip(job, sink), fields(frames = job.frame_count()))]
pub fn render_to_sink(
    job: &MorphJob,
    sink: &mut dyn FrameSink,
    fps: Fps,
    threading: &RenderThreading,
) -> MorphResult<u64> {
    let canvas = job.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;

    let total = job.frame_count();
    if !threading.parallel {
        for j in 0..total {
            let frame = job.render_frame(j)?;
            sink.push_frame(FrameIndex(j), &frame)?;
        }
    } else {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = 0u64;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);
            let frames: Vec<MorphResult<FrameRGBA>> = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|j| job.render_frame(j))
                    .collect()
            });
            for (j, frame) in (chunk_start..chunk_end).zip(frames) {
                sink.push_frame(FrameIndex(j), &frame?)?;
            }
            tracing::debug!(chunk_start, chunk_end, "chunk pushed");
            chunk_start = chunk_end;
        }
    }

    sink.end()?;
    tracing::info!(frames = total, "sequence complete");
    Ok(total)
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> MorphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MorphError::input(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MorphError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
