use minifb::{Key, Window, WindowOptions};
use vek::*;

use escher::obj::{self, ObjVertex};
use escher::{Buffer2d, Context, DefaultGeometry, DepthBuffer, Pipeline, Shader};

/// Transforms model-space vertices and bakes a simple directional Gouraud term into the
/// vertex colour.
struct Gouraud {
    angle: f32,
    proj: Mat4<f32>,
    model_view: Mat4<f32>,
    light_dir: Vec3<f32>,
}

impl Shader for Gouraud {
    type Input = ObjVertex;
    type Output = ObjVertex;

    #[inline(always)]
    fn apply(&self, mut v: ObjVertex) -> ObjVertex {
        let world_normal = (self.model_view * Vec4::from_direction(v.normal)).xyz();

        let ambient = 0.2;
        let diffuse = if world_normal.magnitude_squared() > 0.0 {
            world_normal.normalized().dot(-self.light_dir).max(0.0)
        } else {
            // Models without normals render unlit.
            0.8
        };

        v.color = Vec3::broadcast(ambient + diffuse * 0.8);
        v.pos = self.proj * self.model_view * v.pos;
        v
    }

    fn update(&mut self) {
        self.model_view = Mat4::translation_3d(Vec3::new(0.0, 0.0, 3.5))
            * Mat4::rotation_y(self.angle * 0.5)
            * Mat4::rotation_x(std::f32::consts::PI);
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

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Usage: obj_viewer <model.obj>");
    let mesh = obj::load(&path).unwrap();

    let [w, h] = [800, 600];

    let mut color = Buffer2d::new([w, h], 0u32);
    let mut depth = DepthBuffer::new([w, h]);

    let mut pipeline = Pipeline::new(Context::new(
        Gouraud {
            angle: 0.0,
            proj: Mat4::perspective_fov_lh_zo(1.3, w as f32, h as f32, 0.01, 100.0),
            model_view: Mat4::identity(),
            light_dir: Vec3::new(0.4, -0.6, 0.7).normalized(),
        },
        DefaultGeometry::default(),
        Shade,
    ));

    let mut win = Window::new("OBJ Viewer", w, h, WindowOptions::default()).unwrap();

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
