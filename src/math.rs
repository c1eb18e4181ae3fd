use vek::*;

/// 2-D barycentric weights of `p` with respect to the triangle `(a, b, c)`.
///
/// Uses the dot-product formulation. The weights always sum to 1; a weight is negative
/// exactly when `p` lies on the far side of the opposing edge. For a degenerate
/// (collinear) triangle the denominator vanishes and the weights come out non-finite,
/// which callers treat as a failed coverage test.
pub fn barycentric(p: Vec2<f32>, a: Vec2<f32>, b: Vec2<f32>, c: Vec2<f32>) -> Vec3<f32> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;

    Vec3::new(1.0 - v - w, v, w)
}

/// Blend three scalars with barycentric weights.
#[inline(always)]
pub fn bary_blend(bary: Vec3<f32>, values: Vec3<f32>) -> f32 {
    bary.dot(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corners_and_centroid() {
        let (a, b, c) = (
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
        );

        for (p, expected) in [
            (a, Vec3::new(1.0, 0.0, 0.0)),
            (b, Vec3::new(0.0, 1.0, 0.0)),
            (c, Vec3::new(0.0, 0.0, 1.0)),
        ]
        .iter()
        {
            let bary = barycentric(*p, a, b, c);
            assert_relative_eq!(bary.x, expected.x, epsilon = 1e-6);
            assert_relative_eq!(bary.y, expected.y, epsilon = 1e-6);
            assert_relative_eq!(bary.z, expected.z, epsilon = 1e-6);
        }

        let centroid = (a + b + c) / 3.0;
        let bary = barycentric(centroid, a, b, c);
        assert_relative_eq!(bary.x, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(bary.y, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(bary.z, 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn weights_sum_to_one() {
        let (a, b, c) = (
            Vec2::new(13.0, 7.5),
            Vec2::new(201.0, 44.0),
            Vec2::new(96.0, 133.0),
        );

        for i in 0..32 {
            let p = Vec2::new(5.0 + 7.3 * i as f32, 3.0 + 4.1 * i as f32);
            let bary = barycentric(p, a, b, c);
            assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn outside_points_go_negative() {
        let (a, b, c) = (
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
        );

        let bary = barycentric(Vec2::new(-1.0, -1.0), a, b, c);
        assert!(bary.reduce_partial_min() < 0.0);
    }

    #[test]
    fn degenerate_triangle_fails_coverage() {
        // All three corners collinear: no finite weights exist.
        let (a, b, c) = (
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
        );

        let bary = barycentric(Vec2::new(0.5, 0.7), a, b, c);
        assert!(!(bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0));
    }
}
