//! Vertex and instance layouts for the box renderer

use bytemuck::{Pod, Zeroable};

use crate::scene::BoxVisual;

/// Cube mesh vertex: position plus outward face normal
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Unit cube centered at the origin, two triangles per face
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 36] = [
    // +X
    v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0]),
    v([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0]),
    v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0]),
    v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0]),
    v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0]),
    v([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0]),
    // -X
    v([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0]),
    v([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0]),
    v([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0]),
    v([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0]),
    v([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0]),
    v([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0]),
    // +Y
    v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0]),
    v([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0]),
    // -Y
    v([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0]),
    v([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0]),
    v([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0]),
    // +Z
    v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0]),
    v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0]),
    v([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0]),
    // -Z
    v([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0]),
    v([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0]),
];

/// Per-box instance data mirrored from a [`BoxVisual`]
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    _pad0: f32,
    /// Effective box size: creation dims times the current scale
    pub scale: [f32; 3],
    _pad1: f32,
    /// Orientation quaternion (xyzw)
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

impl Instance {
    pub fn from_visual(visual: &BoxVisual) -> Self {
        let size = visual.dims * visual.scale;
        Self {
            position: visual.position.to_array(),
            _pad0: 0.0,
            scale: size.to_array(),
            _pad1: 0.0,
            rotation: visual.rotation.to_array(),
            color: [visual.color[0], visual.color[1], visual.color[2], 1.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 32,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 48,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_cube_face_windings_cover_all_normals() {
        for n in [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ] {
            let count = CUBE_VERTICES.iter().filter(|v| v.normal == n).count();
            assert_eq!(count, 6, "face {n:?} needs two triangles");
        }
    }

    #[test]
    fn test_instance_applies_visual_scale() {
        let visual = BoxVisual {
            position: Vec3::new(1.0, 2.0, 3.0),
            dims: Vec3::new(2.0, 0.5, 2.0),
            scale: Vec3::new(0.75, 1.0, 1.0),
            rotation: Quat::IDENTITY,
            color: [1.0, 0.5, 0.0],
        };
        let instance = Instance::from_visual(&visual);
        assert_eq!(instance.scale, [1.5, 0.5, 2.0]);
        assert_eq!(instance.position, [1.0, 2.0, 3.0]);
        assert_eq!(instance.color, [1.0, 0.5, 0.0, 1.0]);
    }
}
