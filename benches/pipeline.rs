use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use std::time::Duration;
use vek::*;

use escher::obj::ObjVertex;
use escher::{Buffer2d, Context, DefaultGeometry, DepthBuffer, Mesh, Pipeline, Shader};

struct Transform {
    mvp: Mat4<f32>,
}

impl Shader for Transform {
    type Input = ObjVertex;
    type Output = ObjVertex;

    #[inline(always)]
    fn apply(&self, mut v: ObjVertex) -> ObjVertex {
        v.pos = self.mvp * v.pos;
        v
    }
}

struct Shade;

impl Shader for Shade {
    type Input = ObjVertex;
    type Output = u32;

    #[inline(always)]
    fn apply(&self, v: ObjVertex) -> u32 {
        let rgb = v.color.map(|e| (e.max(0.0).min(1.0) * 255.0) as u32);
        (rgb.x << 16) | (rgb.y << 8) | rgb.z
    }
}

/// An n×n vertex grid over [-1, 1]² with a gentle height wave, coloured by height.
fn wavy_grid(n: usize) -> Mesh<ObjVertex> {
    let mut vertices = Vec::with_capacity(n * n);
    for yi in 0..n {
        for xi in 0..n {
            let x = xi as f32 / (n - 1) as f32 * 2.0 - 1.0;
            let y = yi as f32 / (n - 1) as f32 * 2.0 - 1.0;
            let h = (x * 3.0).sin() * (y * 3.0).cos() * 0.15;
            vertices.push(ObjVertex {
                pos: Vec4::new(x, y, h, 1.0),
                uv: Vec2::new(x, y) * 0.5 + 0.5,
                normal: Vec3::unit_z(),
                color: Vec3::new(0.5 + h * 2.0, 0.4, 0.8 - h * 2.0),
            });
        }
    }

    let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
    for yi in 0..n - 1 {
        for xi in 0..n - 1 {
            let a = (yi * n + xi) as u32;
            let b = a + 1;
            let c = a + n as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    Mesh::new(vertices, indices)
}

fn grid_benchmark(b: &mut Bencher, &[width, height]: &[usize; 2]) {
    let mesh = wavy_grid(64);

    let mut color = Buffer2d::new([width, height], 0u32);
    let mut depth = DepthBuffer::new([width, height]);

    let mvp = Mat4::perspective_fov_lh_zo(1.3, width as f32, height as f32, 0.01, 100.0)
        * Mat4::translation_3d(Vec3::new(0.0, 0.0, 1.8))
        * Mat4::rotation_x(0.6);

    let pipeline = Pipeline::new(Context::new(
        Transform { mvp },
        DefaultGeometry::default(),
        Shade,
    ));

    b.iter(|| {
        color.clear(0);
        depth.clear();

        pipeline.submit(&mesh, &mut color, &mut depth);

        black_box(&mut color);
        black_box(&mut depth);
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function_over_inputs(
        "wavy_grid",
        |b, &size| grid_benchmark(b, size),
        &[[32, 32], [640, 480], [1024, 800]],
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_millis(1000));
    targets = criterion_benchmark
}

criterion_main!(benches);
