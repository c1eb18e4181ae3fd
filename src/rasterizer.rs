use vek::*;

use crate::buffer::{DepthBuffer, Target};
use crate::interpolate::Vertex;
use crate::math::{bary_blend, barycentric};
use crate::mesh::Triangle;
use crate::shader::Shader;

/// Rasterize a screen-space triangle into the given colour and depth targets.
///
/// The triangle must have passed through the screen-mapping stage: `pos.x`/`pos.y` in
/// pixel coordinates, `pos.w` carrying `1/w_clip` and every other attribute carrying
/// `attr/w_clip`. Pixels are scanned in row-major order over the triangle's bounding box,
/// tested for coverage at their centre against the 2-D barycentric weights, depth-tested,
/// and shaded with the fragment stage.
///
/// Pixels whose centre lands exactly on an edge (a zero barycentric weight) are included.
/// A degenerate triangle produces non-finite weights, fails coverage and is skipped
/// wholesale.
pub fn draw_triangle<V, F, T>(tri: &Triangle<V>, fragment: &F, color: &mut T, depth: &mut DepthBuffer)
where
    V: Vertex,
    F: Shader<Input = V>,
    F::Output: Clone,
    T: Target<Item = F::Output>,
{
    let [width, height] = color.size();

    let a = tri.a.position();
    let b = tri.b.position();
    let c = tri.c.position();

    // Bounding box, clamped to the screen.
    let min = a
        .xy()
        .map2(b.xy(), f32::min)
        .map2(c.xy(), f32::min)
        .map(|e| (e as i32).max(0));
    let max = a
        .xy()
        .map2(b.xy(), f32::max)
        .map2(c.xy(), f32::max)
        .map2(Vec2::new(width, height), |e, sz| {
            (e as i32).min(sz as i32 - 1)
        });

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            // Sample at the centre of the pixel.
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let bary = barycentric(p, a.xy(), b.xy(), c.xy());

            if !(bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0) {
                continue;
            }

            // `pos.w` holds 1/w, so blending it and inverting recovers the eye-space
            // depth at this pixel.
            let w_depth = 1.0 / bary_blend(bary, Vec3::new(a.w, b.w, c.w));

            if depth.test_and_set([x as usize, y as usize], w_depth) {
                let frag = V::berp(bary, &tri.a, &tri.b, &tri.c, w_depth);
                color.plot([x as usize, y as usize], fragment.apply(frag));
            }
        }
    }
}
