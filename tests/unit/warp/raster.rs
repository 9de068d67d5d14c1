use super::*;

fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Triangle {
    Triangle([
        Point::new(a.0, a.1),
        Point::new(b.0, b.1),
        Point::new(c.0, c.1),
    ])
}

#[test]
fn bounding_rounds_outward() {
    let r = PixelRect::bounding(&tri((1.2, 2.0), (6.7, 3.5), (3.0, 8.01)));
    assert_eq!(
        r,
        PixelRect {
            x0: 1,
            y0: 2,
            x1: 7,
            y1: 9
        }
    );
    assert_eq!(r.area(), 42);
}

#[test]
fn sample_window_widens_collapsed_axis() {
    let bounds = PixelRect {
        x0: 0,
        y0: 0,
        x1: 10,
        y1: 10,
    };
    let line = PixelRect {
        x0: 10,
        y0: 2,
        x1: 10,
        y1: 6,
    };
    let w = line.sample_window(bounds).unwrap();
    assert_eq!((w.x0, w.x1, w.y0, w.y1), (9, 10, 2, 6));

    let empty = PixelRect {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };
    assert!(line.sample_window(empty).is_none());
}

#[test]
fn split_square_is_partitioned_exactly() {
    // Diagonal passes exactly through pixel centres (k + 0.5, k + 0.5).
    let a = tri((0.0, 0.0), (8.0, 0.0), (8.0, 8.0));
    let b = tri((0.0, 0.0), (8.0, 8.0), (0.0, 8.0));
    let ca = Coverage::new(&a).unwrap();
    let cb = Coverage::new(&b).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            let p = pixel_center(x, y);
            assert!(
                ca.contains(p) ^ cb.contains(p),
                "pixel ({x}, {y}) not owned by exactly one triangle"
            );
        }
    }
}

#[test]
fn fan_around_shared_vertex_is_partitioned() {
    // Four triangles meeting at a vertex that sits exactly on a pixel centre.
    let c = (4.5, 4.5);
    let tris = [
        tri((0.0, 0.0), (9.0, 0.0), c),
        tri((9.0, 0.0), (9.0, 9.0), c),
        tri((9.0, 9.0), (0.0, 9.0), c),
        tri((0.0, 9.0), (0.0, 0.0), c),
    ];
    let covers: Vec<Coverage> = tris.iter().map(|t| Coverage::new(t).unwrap()).collect();
    for y in 0..9 {
        for x in 0..9 {
            let p = pixel_center(x, y);
            let owners = covers.iter().filter(|c| c.contains(p)).count();
            assert_eq!(owners, 1, "pixel ({x}, {y}) has {owners} owners");
        }
    }
}

#[test]
fn degenerate_triangle_has_no_coverage() {
    assert!(Coverage::new(&tri((0.0, 0.0), (2.0, 2.0), (4.0, 4.0))).is_none());
}

#[test]
fn mask_is_row_major_over_rect() {
    let t = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
    let rect = PixelRect::bounding(&t);
    let mask = Coverage::new(&t).unwrap().mask(rect);
    assert_eq!(mask.len(), 16);
    assert!(mask[0]);
    assert!(mask[2 * 4]);
    assert!(!mask[15]);
    // Six centres lie strictly inside; the four on the hypotenuse go all one way.
    let count = mask.iter().filter(|&&m| m).count();
    assert!(count == 6 || count == 10, "unexpected coverage {count}");
}

#[test]
fn patch_sample_hits_pixel_centres_exactly() {
    let img = RgbaImage::from_fn(4, 3, |x, y| {
        image::Rgba([(x * 10) as u8, (y * 20) as u8, 7, 255])
    });
    let patch = Patch::new(
        &img,
        PixelRect {
            x0: 1,
            y0: 0,
            x1: 4,
            y1: 3,
        },
    )
    .unwrap();
    assert_eq!(patch.sample(Point::new(0.5, 0.5)), [10.0, 0.0, 7.0, 255.0]);
    assert_eq!(patch.sample(Point::new(2.5, 2.5)), [30.0, 40.0, 7.0, 255.0]);
    // Halfway between local columns 0 and 1.
    assert_eq!(patch.sample(Point::new(1.0, 0.5)), [15.0, 0.0, 7.0, 255.0]);
}

#[test]
fn patch_sample_reflects_past_border() {
    let img = RgbaImage::from_fn(3, 1, |x, _| image::Rgba([(x * 100) as u8, 0, 0, 255]));
    let patch = Patch::new(
        &img,
        PixelRect {
            x0: 0,
            y0: 0,
            x1: 3,
            y1: 1,
        },
    )
    .unwrap();
    // Local -0.5 mirrors column -1 onto column 1.
    assert_eq!(patch.sample(Point::new(-0.5, 0.5))[0], 100.0);
    // Local 3.5 mirrors column 3 onto column 1.
    assert_eq!(patch.sample(Point::new(3.5, 0.5))[0], 100.0);
}
