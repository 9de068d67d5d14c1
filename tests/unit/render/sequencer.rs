use super::*;
use crate::mesh::triangle::TriangleIndex;

fn gradient(w: u32, h: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([
            (x * 7) as u8 ^ seed,
            (y * 11) as u8,
            seed.wrapping_mul(3),
            255,
        ])
    })
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn faces(w: u32, h: u32) -> (LandmarkSet, LandmarkSet) {
    let a = LandmarkSet::from_xy(&[(10.0, 12.0), (30.0, 11.0), (20.0, 25.0)])
        .with_anchors(canvas(w, h));
    let b = LandmarkSet::from_xy(&[(14.0, 10.0), (27.0, 14.0), (22.0, 29.0)])
        .with_anchors(canvas(w, h));
    (a, b)
}

fn job(frames: u64) -> MorphJob {
    let (a, b) = faces(40, 36);
    MorphJob::from_landmarks(gradient(40, 36, 1), gradient(40, 36, 90), a, b, frames).unwrap()
}

#[test]
fn frame_count_below_two_is_rejected() {
    let (a, b) = faces(40, 36);
    for frames in [0, 1] {
        let err = MorphJob::from_landmarks(
            gradient(40, 36, 1),
            gradient(40, 36, 2),
            a.clone(),
            b.clone(),
            frames,
        )
        .unwrap_err();
        assert!(matches!(err, MorphError::InvalidFrameCount { .. }));
    }
}

#[test]
fn mismatched_inputs_fail_at_construction() {
    let (a, b) = faces(40, 36);
    let short = LandmarkSet::new(b.points()[1..].to_vec());
    assert!(matches!(
        MorphJob::from_landmarks(gradient(40, 36, 1), gradient(40, 36, 2), a.clone(), short, 5),
        Err(MorphError::LandmarkCountMismatch { .. })
    ));
    assert!(matches!(
        MorphJob::from_landmarks(gradient(40, 36, 1), gradient(41, 36, 2), a, b, 5),
        Err(MorphError::ImageSizeMismatch { .. })
    ));
}

#[test]
fn out_of_range_triangle_fails_at_construction() {
    let (a, b) = faces(40, 36);
    let bad = TriangleList::new(vec![TriangleIndex::new(0, 1, 40).unwrap()]);
    assert!(matches!(
        MorphJob::new(gradient(40, 36, 1), gradient(40, 36, 2), a, b, bad, 4),
        Err(MorphError::IndexOutOfRange { index: 40, .. })
    ));
}

#[test]
fn alpha_steps_evenly_from_zero_to_one() {
    let j = job(5);
    let alphas: Vec<f64> = (0..5).map(|i| j.alpha_at(i)).collect();
    assert_eq!(alphas, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn render_frame_rejects_indices_past_the_end() {
    let j = job(3);
    assert!(j.render_frame(2).is_ok());
    assert!(matches!(j.render_frame(3), Err(MorphError::Input(_))));
    assert!(matches!(j.render_alpha(1.5), Err(MorphError::Input(_))));
    assert!(matches!(j.render_alpha(f64::NAN), Err(MorphError::Input(_))));
}

#[test]
fn parallel_patches_match_sequential_render() {
    let j = job(4);
    for alpha in [0.0, 0.3, 1.0] {
        assert_eq!(
            j.render_alpha(alpha).unwrap(),
            j.render_alpha_parallel(alpha).unwrap()
        );
    }
}

#[test]
fn frames_iterator_is_exact_sized() {
    let mut frames = job(4).frames();
    assert_eq!(frames.len(), 4);
    frames.next().unwrap().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames.by_ref().count(), 3);
    assert!(frames.next().is_none());
}
