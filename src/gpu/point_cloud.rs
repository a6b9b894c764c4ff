//! GPU-resident galaxy point clouds.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::error::ResourceError;
use crate::generator::{GalaxyPoints, PointMaterial};
use crate::resource::{PointCloud, PointCloudBuilder};
use crate::shader::{MaterialUniforms, PointVertex};

/// Vertex and material buffers for one generated galaxy.
///
/// Buffers are destroyed on [`release`](PointCloud::release) or drop,
/// whichever comes first.
pub struct GpuPointCloud {
    vertex_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    point_count: u32,
    released: bool,
}

impl GpuPointCloud {
    /// Record the draw call. Expects the point pipeline and camera bind
    /// group to be set already.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.released || self.point_count == 0 {
            return;
        }
        render_pass.set_bind_group(1, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..6, 0..self.point_count);
    }
}

impl PointCloud for GpuPointCloud {
    fn point_count(&self) -> u32 {
        self.point_count
    }

    fn release(&mut self) {
        if !self.released {
            self.vertex_buffer.destroy();
            self.material_buffer.destroy();
            self.released = true;
        }
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for GpuPointCloud {
    fn drop(&mut self) {
        self.release();
    }
}

/// Builds [`GpuPointCloud`]s on a device.
pub struct GpuPointCloudBuilder<'a> {
    device: &'a wgpu::Device,
    material_layout: &'a wgpu::BindGroupLayout,
    pipeline_material: &'a PointMaterial,
}

impl<'a> GpuPointCloudBuilder<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        material_layout: &'a wgpu::BindGroupLayout,
        pipeline_material: &'a PointMaterial,
    ) -> Self {
        Self {
            device,
            material_layout,
            pipeline_material,
        }
    }
}

impl PointCloudBuilder for GpuPointCloudBuilder<'_> {
    type Resource = GpuPointCloud;

    fn build(&mut self, points: &GalaxyPoints) -> Result<GpuPointCloud, ResourceError> {
        if !points.material().shares_pipeline_state(self.pipeline_material) {
            return Err(ResourceError::IncompatibleMaterial);
        }

        let mut vertices = PointVertex::from_points(points);
        let point_count = vertices.len() as u32;
        // Keep the buffer non-empty; an empty cloud simply draws nothing.
        if vertices.is_empty() {
            vertices.push(PointVertex::zeroed());
        }

        let bytes = (vertices.len() * std::mem::size_of::<PointVertex>()) as u64;
        let limit = self.device.limits().max_buffer_size;
        if bytes > limit {
            return Err(ResourceError::TooLarge { bytes, limit });
        }

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Point Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let material_uniforms = MaterialUniforms::from(points.material());
        let material_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Material Buffer"),
            contents: bytemuck::bytes_of(&material_uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let material_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Galaxy Material Bind Group"),
            layout: self.material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        if let Some(err) = out_of_memory.or(validation) {
            vertex_buffer.destroy();
            material_buffer.destroy();
            return Err(ResourceError::Device(err.to_string()));
        }

        Ok(GpuPointCloud {
            vertex_buffer,
            material_buffer,
            material_bind_group,
            point_count,
            released: false,
        })
    }
}
