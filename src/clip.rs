use smallvec::SmallVec;
use vek::*;

use crate::interpolate::Vertex;

/// The number of frustum planes a clip-space position is tested against.
pub const PLANES: u8 = 6;

/// The clipper's output polygon. A swept triangle edge emits at most two vertices, so six
/// slots always suffice and the hot path never allocates.
pub type Polygon<V> = SmallVec<[V; 6]>;

/// Test value of `v` against clip plane `i`; non-negative means inside.
///
/// Planes are numbered 0 left, 1 right, 2 top, 3 bottom, 4 near, 5 far.
#[inline(always)]
fn plane(i: u8, v: Vec4<f32>) -> f32 {
    match i {
        0 => v.w + v.x,
        1 => v.w - v.x,
        2 => v.w - v.y,
        3 => v.w + v.y,
        4 => v.z,
        5 => v.w - v.z,
        _ => unreachable!("clip plane index out of range"),
    }
}

/// The 6-bit mask of clip planes `v` lies outside of. Zero means fully inside.
pub fn out_code(v: Vec4<f32>) -> u8 {
    let mut code = 0;
    for i in 0..PLANES {
        if plane(i, v) < 0.0 {
            code |= 1 << i;
        }
    }
    code
}

/// Clip a clip-space triangle against all six frustum planes.
///
/// This is the homogeneous Cohen–Sutherland variant: the triangle is treated as the
/// closed polyline `v0 → v1 → v2 → v0` and swept edge by edge, emitting entry and exit
/// points where an edge crosses the frustum boundary. The emitted vertex sequence is a
/// convex polygon with every vertex inside all six planes; fan-triangulate it to recover
/// triangles.
///
/// Crossing points are produced with [`crate::Interpolate::lerp`] on the whole payload,
/// so every attribute is clipped in lockstep with position.
pub fn clip_triangle<V: Vertex>(v0: &V, v1: &V, v2: &V) -> Polygon<V> {
    let mut out = Polygon::new();

    let mut last = v0;
    let mut old_code = out_code(last.position());

    for &current in [v1, v2, v0].iter() {
        let new_code = out_code(current.position());
        let mask = new_code | old_code;

        if old_code & new_code != 0 {
            // Both endpoints beyond the same plane; the edge cannot touch the frustum.
        } else if mask == 0 {
            out.push(current.clone());
        } else {
            // Shrink [old_alpha, new_alpha] along last → current until the segment lies
            // inside every plane flagged in `mask`.
            let mut old_alpha = 0.0;
            let mut new_alpha = 1.0;

            for i in 0..PLANES {
                if mask & (1 << i) == 0 {
                    continue;
                }

                let t_last = plane(i, last.position());
                let t_current = plane(i, current.position());
                let alpha = t_last / (t_last - t_current);

                if old_code & (1 << i) != 0 {
                    old_alpha = f32::max(old_alpha, alpha);
                } else {
                    new_alpha = f32::min(new_alpha, alpha);
                }

                if old_alpha > new_alpha {
                    break;
                }
            }

            if old_alpha <= new_alpha {
                if old_code != 0 {
                    out.push(V::lerp(last, current, old_alpha));
                }

                if new_code != 0 {
                    out.push(V::lerp(last, current, new_alpha));
                } else {
                    out.push(current.clone());
                }
            }
        }

        last = current;
        old_code = new_code;
    }

    out
}
