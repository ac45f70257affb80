use glam::{Mat4, Vec3};
use sandbox_common::PrimitiveKind;

/// Vertex layout shared by every primitive: position and texture coordinates
/// with V pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side mesh. `indices` is empty for non-indexed meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn for_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Triangle => triangle(),
            PrimitiveKind::Plane => plane(),
            PrimitiveKind::Cube => cube(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of vertices the draw call consumes.
    pub fn draw_count(&self) -> u32 {
        if self.is_indexed() {
            self.indices.len() as u32
        } else {
            self.vertices.len() as u32
        }
    }
}

fn v(position: [f32; 3], uv: [f32; 2]) -> MeshVertex {
    MeshVertex { position, uv }
}

fn triangle() -> MeshData {
    MeshData {
        vertices: vec![
            v([-0.5, -0.5, 0.0], [0.0, 0.0]),
            v([0.5, -0.5, 0.0], [1.0, 0.0]),
            v([0.0, 0.5, 0.0], [0.5, 1.0]),
        ],
        indices: Vec::new(),
    }
}

fn plane() -> MeshData {
    MeshData {
        vertices: vec![
            v([0.5, 0.5, 0.0], [1.0, 1.0]),   // top right
            v([0.5, -0.5, 0.0], [1.0, 0.0]),  // bottom right
            v([-0.5, -0.5, 0.0], [0.0, 0.0]), // bottom left
            v([-0.5, 0.5, 0.0], [0.0, 1.0]),  // top left
        ],
        // counter-clockwise seen from +Z
        indices: vec![0, 3, 1, 1, 3, 2],
    }
}

/// 36-vertex cube, two counter-clockwise triangles per face.
fn cube() -> MeshData {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // -Z
        v([ p, -p, -p], [0.0, 0.0]), v([-p, -p, -p], [1.0, 0.0]), v([-p,  p, -p], [1.0, 1.0]),
        v([-p,  p, -p], [1.0, 1.0]), v([ p,  p, -p], [0.0, 1.0]), v([ p, -p, -p], [0.0, 0.0]),
        // +Z
        v([-p, -p,  p], [0.0, 0.0]), v([ p, -p,  p], [1.0, 0.0]), v([ p,  p,  p], [1.0, 1.0]),
        v([ p,  p,  p], [1.0, 1.0]), v([-p,  p,  p], [0.0, 1.0]), v([-p, -p,  p], [0.0, 0.0]),
        // -X
        v([-p, -p, -p], [0.0, 0.0]), v([-p, -p,  p], [1.0, 0.0]), v([-p,  p,  p], [1.0, 1.0]),
        v([-p,  p,  p], [1.0, 1.0]), v([-p,  p, -p], [0.0, 1.0]), v([-p, -p, -p], [0.0, 0.0]),
        // +X
        v([ p, -p,  p], [0.0, 0.0]), v([ p, -p, -p], [1.0, 0.0]), v([ p,  p, -p], [1.0, 1.0]),
        v([ p,  p, -p], [1.0, 1.0]), v([ p,  p,  p], [0.0, 1.0]), v([ p, -p,  p], [0.0, 0.0]),
        // -Y
        v([-p, -p, -p], [0.0, 1.0]), v([ p, -p, -p], [1.0, 1.0]), v([ p, -p,  p], [1.0, 0.0]),
        v([ p, -p,  p], [1.0, 0.0]), v([-p, -p,  p], [0.0, 0.0]), v([-p, -p, -p], [0.0, 1.0]),
        // +Y
        v([-p,  p,  p], [0.0, 0.0]), v([ p,  p,  p], [1.0, 0.0]), v([ p,  p, -p], [1.0, 1.0]),
        v([ p,  p, -p], [1.0, 1.0]), v([-p,  p, -p], [0.0, 1.0]), v([-p,  p,  p], [0.0, 0.0]),
    ];
    MeshData {
        vertices,
        indices: Vec::new(),
    }
}

/// Object layout of the demo scene.
pub const OBJECT_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Static tilt per object index, in degrees.
pub const TILT_STEP_DEGREES: f32 = 20.0;
/// Spin rate of every third object, in degrees per second.
pub const SPIN_DEGREES_PER_SECOND: f32 = 25.0;

/// What to draw: one primitive instanced at a list of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub primitive: PrimitiveKind,
    pub positions: Vec<Vec3>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PrimitiveKind::Cube)
    }
}

impl Scene {
    pub fn new(primitive: PrimitiveKind) -> Self {
        Self {
            primitive,
            positions: OBJECT_POSITIONS.to_vec(),
        }
    }

    pub fn rotation_axis() -> Vec3 {
        Vec3::new(1.0, 0.3, 0.5).normalize()
    }

    /// Rotation of object `index` at `elapsed` seconds, in degrees.
    pub fn angle_degrees(index: usize, elapsed: f32) -> f32 {
        if index % 3 == 0 {
            elapsed * SPIN_DEGREES_PER_SECOND
        } else {
            TILT_STEP_DEGREES * index as f32
        }
    }

    /// Model matrix per object: rotate about the shared axis, then translate.
    pub fn model_matrices(&self, elapsed: f32) -> Vec<Mat4> {
        let axis = Self::rotation_axis();
        self.positions
            .iter()
            .enumerate()
            .map(|(i, position)| {
                Mat4::from_translation(*position)
                    * Mat4::from_axis_angle(axis, Self::angle_degrees(i, elapsed).to_radians())
            })
            .collect()
    }
}
