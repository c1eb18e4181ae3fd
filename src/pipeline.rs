use vek::*;

use crate::buffer::{DepthBuffer, Target};
use crate::clip::clip_triangle;
use crate::interpolate::{Interpolate, Vertex};
use crate::mesh::{Mesh, Triangle};
use crate::rasterizer;
use crate::shader::{Context, Shader};

/// Triangles whose vertices reach perspective division with `|w|` below this are dropped
/// rather than divided.
const MIN_W: f32 = 1e-6;

/// The triangle-processing pipeline.
///
/// A pipeline owns a [`Context`] of vertex, geometry and fragment stages and drives
/// submitted meshes through, in order: vertex transform, triangle assembly (back-face
/// cull, trivial frustum reject, behind-camera reject), homogeneous clipping, fan
/// triangulation, the geometry stage, perspective divide + screen mapping, and
/// rasterization with depth testing.
///
/// Everything runs synchronously on the calling thread; [`Pipeline::submit`] returns
/// once the last pixel of the mesh has been plotted.
pub struct Pipeline<V, G, F> {
    pub context: Context<V, G, F>,
}

impl<V, G, F, VOut, GOut> Pipeline<V, G, F>
where
    V: Shader<Output = VOut>,
    V::Input: Clone,
    VOut: Vertex,
    G: Shader<Input = Triangle<VOut>, Output = Triangle<GOut>>,
    GOut: Vertex,
    F: Shader<Input = GOut>,
    F::Output: Clone,
{
    pub fn new(context: Context<V, G, F>) -> Self {
        Self { context }
    }

    /// Run the whole pipeline over one indexed mesh.
    ///
    /// The colour and depth targets are borrowed for the duration of the call and must
    /// have matching dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the index list does not describe whole triangles, an index is out of
    /// range, or the targets disagree about their size.
    pub fn submit<T>(&self, mesh: &Mesh<V::Input>, color: &mut T, depth: &mut DepthBuffer)
    where
        T: Target<Item = F::Output>,
    {
        assert_eq!(
            mesh.indices.len() % 3,
            0,
            "Mesh indices must form whole triangles"
        );
        assert_eq!(
            color.size(),
            depth.size(),
            "Colour and depth targets are not similarly sized!"
        );

        let size = color.size();

        // Run the vertex stage once per source vertex.
        let transformed: Vec<VOut> = mesh
            .vertices
            .iter()
            .map(|v| self.context.vertex.apply(v.clone()))
            .collect();

        for tri in mesh.indices.chunks_exact(3) {
            let v0 = &transformed[tri[0] as usize];
            let v1 = &transformed[tri[1] as usize];
            let v2 = &transformed[tri[2] as usize];

            if is_backfacing(v0.position(), v1.position(), v2.position())
                || trivially_rejected(v0.position(), v1.position(), v2.position())
            {
                continue;
            }

            let polygon = clip_triangle(v0, v1, v2);
            if polygon.len() < 3 {
                continue;
            }

            // Fan-triangulate the clipped polygon and push each triangle through the
            // remaining stages.
            for pair in polygon[1..].windows(2) {
                let tri = Triangle::new(polygon[0].clone(), pair[0].clone(), pair[1].clone());
                let Triangle { mut a, mut b, mut c } = self.context.geometry.apply(tri);

                if to_screen(&mut a, size) && to_screen(&mut b, size) && to_screen(&mut c, size) {
                    rasterizer::draw_triangle(
                        &Triangle { a, b, c },
                        &self.context.fragment,
                        color,
                        depth,
                    );
                }
            }
        }
    }
}

/// Clip-space back-face test.
///
/// The face normal is taken in clip space from the triangle's xyz edges; a triangle is
/// rejected when the eye vector towards `v0` does not strictly face against it. The
/// original formulation normalized the eye vector, which is undefined for a vertex at
/// the origin and does not affect the sign, so the normalize is omitted.
fn is_backfacing(a: Vec4<f32>, b: Vec4<f32>, c: Vec4<f32>) -> bool {
    let a = a.xyz();
    let n = (b.xyz() - a).cross(c.xyz() - a);
    (-a).dot(n) >= 0.0
}

/// Trivial frustum rejection: the whole triangle beyond one clip half-space, or entirely
/// behind the camera.
fn trivially_rejected(a: Vec4<f32>, b: Vec4<f32>, c: Vec4<f32>) -> bool {
    if (a.x > a.w && b.x > b.w && c.x > c.w) || (a.x < -a.w && b.x < -b.w && c.x < -c.w) {
        return true;
    }
    if (a.y > a.w && b.y > b.w && c.y > c.w) || (a.y < -a.w && b.y < -b.w && c.y < -c.w) {
        return true;
    }
    if (a.z > a.w && b.z > b.w && c.z > c.w) || (a.z < -a.w && b.z < -b.w && c.z < -c.w) {
        return true;
    }

    a.z < 0.0 && b.z < 0.0 && c.z < 0.0
}

/// Perspective divide and viewport mapping for one vertex.
///
/// Dividing the whole payload by `w` replaces every attribute with `attr/w`; the
/// position's `w` is then overwritten to carry `1/w` for the rasterizer's depth and
/// perspective-correct attribute reconstruction. Returns `false` for an unusably small
/// `w`, in which case the caller drops the triangle.
fn to_screen<P: Vertex>(v: &mut P, [width, height]: [usize; 2]) -> bool {
    let w = v.position().w;
    if w.abs() < MIN_W {
        return false;
    }

    let inv_w = 1.0 / w;
    *v = v.clone().scale(inv_w);

    let pos = v.position_mut();
    pos.w = inv_w;
    pos.x = ((pos.x + 1.0) * width as f32) / 2.0;
    pos.y = ((-pos.y + 1.0) * height as f32) / 2.0;

    true
}
