use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::landmarks::set::LandmarkSet;

fn job(frames: u64) -> MorphJob {
    let canvas = Canvas {
        width: 24,
        height: 18,
    };
    let a = LandmarkSet::from_xy(&[(8.0, 6.0), (16.0, 7.0)]).with_anchors(canvas);
    let b = LandmarkSet::from_xy(&[(9.0, 9.0), (15.0, 5.0)]).with_anchors(canvas);
    let src = image::RgbaImage::from_fn(24, 18, |x, y| {
        image::Rgba([x as u8 * 9, y as u8 * 13, 0, 255])
    });
    let dst = image::RgbaImage::from_fn(24, 18, |x, y| {
        image::Rgba([0, x as u8 * 5, y as u8 * 3, 255])
    });
    MorphJob::from_landmarks(src, dst, a, b, frames).unwrap()
}

#[test]
fn sequential_render_pushes_ordered_frames() {
    let j = job(4);
    let mut sink = InMemorySink::new();
    let fps = Fps::new(25, 1).unwrap();
    let pushed = render_to_sink(&j, &mut sink, fps, &RenderThreading::default()).unwrap();

    assert_eq!(pushed, 4);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps), (24, 18, fps));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
}

#[test]
fn parallel_render_matches_sequential() {
    let j = job(7);
    let fps = Fps::new(30, 1).unwrap();

    let mut seq = InMemorySink::new();
    render_to_sink(&j, &mut seq, fps, &RenderThreading::default()).unwrap();

    let mut par = InMemorySink::new();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 3,
        threads: Some(2),
    };
    render_to_sink(&j, &mut par, fps, &threading).unwrap();

    assert_eq!(seq.frames(), par.frames());
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(build_thread_pool(Some(0)), Err(MorphError::Input(_))));
    assert_eq!(normalized_chunk_size(0), 1);
}
