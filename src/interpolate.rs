use core::ops::{Add, Mul};
use vek::*;

/// A trait used to enable types to be interpolated throughout the rasterization process.
///
/// Every operation applies the same weights to every component of the value. The
/// rasterizer's perspective-correct attribute reconstruction is only sound if a payload's
/// attributes are interpolated in lockstep with its position, so implementations must never
/// weight one field differently from another.
///
/// You should rarely need to implement this trait by hand: any type that is `Clone` and
/// supports field-wise `Add` and `Mul<f32>` (for instance via `derive_more`'s
/// `#[derive(Add, Mul)]`) gets an implementation for free.
pub trait Interpolate: Clone {
    /// Multiply every component by the scalar `s`.
    fn scale(self, s: f32) -> Self;

    /// Linearly interpolate between `a` and `b`, `alpha` running from `a` to `b`.
    fn lerp(a: &Self, b: &Self, alpha: f32) -> Self;

    /// Blend the three corner values with barycentric weights `bary`, then multiply the
    /// result by `d`.
    fn berp(bary: Vec3<f32>, a: &Self, b: &Self, c: &Self, d: f32) -> Self;
}

impl<T: Clone + Add<Output = T> + Mul<f32, Output = T>> Interpolate for T {
    #[inline(always)]
    fn scale(self, s: f32) -> Self {
        self * s
    }

    #[inline(always)]
    fn lerp(a: &Self, b: &Self, alpha: f32) -> Self {
        a.clone() * (1.0 - alpha) + b.clone() * alpha
    }

    #[inline(always)]
    fn berp(bary: Vec3<f32>, a: &Self, b: &Self, c: &Self, d: f32) -> Self {
        (a.clone() * bary.x + b.clone() * bary.y + c.clone() * bary.z) * d
    }
}

/// A vertex payload that can flow through the pipeline.
///
/// A payload carries a homogeneous clip-space position alongside any number of
/// interpolable attributes (colours, UVs, normals, ...). After the screen-mapping stage
/// the position is repurposed: `x`/`y` hold pixel coordinates and `w` holds `1/w_clip`.
/// That `w` is pipeline-internal state and should not be read by fragment shaders.
pub trait Vertex: Interpolate {
    /// The payload's position.
    fn position(&self) -> Vec4<f32>;

    /// Mutable access to the payload's position.
    fn position_mut(&mut self) -> &mut Vec4<f32>;
}
