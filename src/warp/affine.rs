use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::orient2d;

/// Solve the unique affine map sending `from[i]` to `to[i]` for `i in 0..3`.
///
/// Only `from` has to be non-degenerate; `to` may collapse onto a line or point.
pub fn solve_affine(from: [Point; 3], to: [Point; 3]) -> MorphResult<Affine> {
    let det = orient2d(from[0], from[1], from[2]);
    if det == 0.0 || !det.is_finite() {
        return Err(MorphError::geometry(
            "cannot solve affine map from a zero-area triangle",
        ));
    }
    Ok(frame_of(to) * frame_of(from).inverse())
}

/// Map taking the unit triangle `(0,0), (1,0), (0,1)` onto `t`.
fn frame_of(t: [Point; 3]) -> Affine {
    let u = t[1] - t[0];
    let v = t[2] - t[0];
    Affine::new([u.x, u.y, v.x, v.y, t[0].x, t[0].y])
}

#[cfg(test)]
#[path = "../../tests/unit/warp/affine.rs"]
mod tests;
