use super::*;
use crate::mesh::delaunay::{triangulate, triangulate_observed};

fn square() -> LandmarkSet {
    LandmarkSet::from_xy(&[(0.0, 0.0), (31.0, 0.0), (0.0, 31.0), (31.0, 31.0), (15.0, 15.0)])
}

#[test]
fn mesh_overlay_marks_edges_and_landmarks() {
    let base = RgbaImage::new(32, 32);
    let set = square();
    let list = triangulate(32, 32, &set).unwrap();
    let out = draw_mesh(&base, &set, list.as_slice()).unwrap();

    assert_eq!(out.dimensions(), base.dimensions());
    assert_eq!(*out.get_pixel(15, 15), DOT);
    // Top edge of the frame is a mesh edge.
    assert_eq!(*out.get_pixel(8, 0), EDGE);
    // Untouched interior pixel away from edges and dots.
    assert_eq!(*out.get_pixel(15, 4), Rgba([0, 0, 0, 0]));
}

#[test]
fn bad_index_is_reported() {
    let base = RgbaImage::new(8, 8);
    let set = LandmarkSet::from_xy(&[(0.0, 0.0), (7.0, 0.0), (0.0, 7.0)]);
    let bad = [TriangleIndex::new(0, 1, 5).unwrap()];
    assert!(draw_mesh(&base, &set, &bad).is_err());
}

#[test]
fn animation_records_one_frame_per_insertion() {
    let base = RgbaImage::new(32, 32);
    let set = square();
    let mut anim = MeshAnimation::new(&base, &set);
    triangulate_observed(32, 32, &set, &mut anim).unwrap();
    let frames = anim.finish().unwrap();

    assert_eq!(frames.len(), set.len());
    assert_eq!(*frames[0].get_pixel(0, 0), INSERTED);
    assert_eq!(*frames[4].get_pixel(15, 15), INSERTED);
}
