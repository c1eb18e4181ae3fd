use derive_more::{Add, Mul};
use minifb::{Key, Window, WindowOptions};
use vek::*;

use escher::{Buffer2d, Context, DefaultGeometry, DepthBuffer, Mesh, Pipeline, Shader, Vertex};

#[derive(Clone, Add, Mul)]
struct ColorVertex {
    pos: Vec4<f32>,
    color: Rgb<f32>,
}

impl Vertex for ColorVertex {
    fn position(&self) -> Vec4<f32> {
        self.pos
    }

    fn position_mut(&mut self) -> &mut Vec4<f32> {
        &mut self.pos
    }
}

struct Spin {
    angle: f32,
    proj: Mat4<f32>,
    mvp: Mat4<f32>,
}

impl Shader for Spin {
    type Input = ColorVertex;
    type Output = ColorVertex;

    #[inline(always)]
    fn apply(&self, mut v: ColorVertex) -> ColorVertex {
        v.pos = self.mvp * v.pos;
        v
    }

    fn update(&mut self) {
        self.mvp = self.proj
            * Mat4::translation_3d(Vec3::new(0.0, 0.0, 4.0))
            * Mat4::rotation_x(self.angle * 0.8)
            * Mat4::rotation_y(self.angle * 0.6);
    }
}

struct Flat;

impl Shader for Flat {
    type Input = ColorVertex;
    type Output = u32;

    #[inline(always)]
    fn apply(&self, v: ColorVertex) -> u32 {
        let rgb = v.color.map(|e| (e.max(0.0).min(1.0) * 255.0) as u32);
        (rgb.r << 16) | (rgb.g << 8) | rgb.b
    }
}

/// Six quads wound counter-clockwise as projected on screen for their visible side.
fn cube() -> Mesh<ColorVertex> {
    let faces: [([Vec3<f32>; 4], Rgb<f32>); 6] = [
        // -z (towards the camera at rest)
        (
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
            ],
            Rgb::new(1.0, 0.2, 0.2),
        ),
        // +z
        (
            [
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, -1.0, 1.0),
            ],
            Rgb::new(0.2, 1.0, 0.2),
        ),
        // -x
        (
            [
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(-1.0, 1.0, 1.0),
            ],
            Rgb::new(0.2, 0.2, 1.0),
        ),
        // +x
        (
            [
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, -1.0),
            ],
            Rgb::new(1.0, 1.0, 0.2),
        ),
        // -y
        (
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, -1.0, -1.0),
            ],
            Rgb::new(1.0, 0.2, 1.0),
        ),
        // +y
        (
            [
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, 1.0, 1.0),
            ],
            Rgb::new(0.2, 1.0, 1.0),
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (corners, color) in faces.iter() {
        let base = vertices.len() as u32;
        for corner in corners.iter() {
            vertices.push(ColorVertex {
                pos: Vec4::from_point(*corner),
                color: *color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices)
}

fn main() {
    let [w, h] = [800, 600];

    let mut color = Buffer2d::new([w, h], 0u32);
    let mut depth = DepthBuffer::new([w, h]);

    let mesh = cube();

    let proj = Mat4::perspective_fov_lh_zo(1.3, w as f32, h as f32, 0.01, 100.0);
    let mut pipeline = Pipeline::new(Context::new(
        Spin {
            angle: 0.0,
            proj,
            mvp: proj,
        },
        DefaultGeometry::default(),
        Flat,
    ));

    let mut win = Window::new("Spinning Cube", w, h, WindowOptions::default()).unwrap();

    let init = std::time::Instant::now();
    while win.is_open() && !win.is_key_down(Key::Escape) {
        color.clear(0);
        depth.clear();

        pipeline.context.vertex.angle = init.elapsed().as_secs_f32();
        pipeline.context.update();

        pipeline.submit(&mesh, &mut color, &mut depth);

        win.update_with_buffer(color.raw(), w, h).unwrap();
    }
}
