//! Point shader source and the GPU-side data layouts it reads.

use bytemuck::{Pod, Zeroable};

use crate::generator::{GalaxyPoints, PointMaterial};

pub const SHADER_SOURCE: &str = include_str!("galaxy.wgsl");

/// Fullscreen pass that stretches a reduced-resolution scene over the surface.
pub const UPSCALE_SHADER_SOURCE: &str = include_str!("upscale.wgsl");

/// One point as uploaded to the vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // color
    ];

    /// Interleave positions and colors.
    pub fn from_points(points: &GalaxyPoints) -> Vec<PointVertex> {
        points
            .positions()
            .iter()
            .zip(points.colors())
            .map(|(position, color)| PointVertex {
                position: position.to_array(),
                color: color.to_array(),
            })
            .collect()
    }
}

/// Per-frame camera data (bind group 0).
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

/// Per-point-cloud material data (bind group 1).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub size: f32,
    pub size_attenuation: u32,
    pub vertex_colors: u32,
    pub _padding: f32,
}

impl From<&PointMaterial> for MaterialUniforms {
    fn from(material: &PointMaterial) -> Self {
        Self {
            size: material.size,
            size_attenuation: material.size_attenuation as u32,
            vertex_colors: material.vertex_colors as u32,
            _padding: 0.0,
        }
    }
}
