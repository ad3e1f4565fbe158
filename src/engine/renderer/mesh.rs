// Lit mesh rendering: the terrain triangle list and the player capsule

use super::texture::DEPTH_FORMAT;
use super::vertex::MeshVertex;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Smallest allocation for a growable buffer, in bytes
const MIN_BUFFER_SIZE: u64 = 4096;

/// Size a growable buffer must have to hold `required` bytes
pub fn grown_capacity(current: u64, required: u64) -> u64 {
    if required <= current {
        current
    } else {
        required.next_power_of_two().max(MIN_BUFFER_SIZE)
    }
}

/// Vertex buffer that is rewritten in place and reallocated only when it
/// runs out of room
pub struct DynamicBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
    len: u32,
}

impl DynamicBuffer {
    pub fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, MIN_BUFFER_SIZE),
            capacity: MIN_BUFFER_SIZE,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the buffer contents
    pub fn upload<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let required = bytes.len() as u64;

        let capacity = grown_capacity(self.capacity, required);
        if capacity != self.capacity {
            log::debug!("Growing {} to {} bytes", self.label, capacity);
            self.buffer = Self::allocate(device, self.label, capacity);
            self.capacity = capacity;
        }

        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = data.len() as u32;
    }

    /// Number of elements last uploaded
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Per-draw uniforms
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl MeshUniform {
    pub fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

/// A uniform buffer and the bind group that exposes it
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[MeshUniform::new(Mat4::IDENTITY, Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, uniform: MeshUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

/// Indexed mesh uploaded once
struct IndexedMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Draws the terrain and the capsule with one pipeline
pub struct MeshRenderer {
    render_pipeline: wgpu::RenderPipeline,
    terrain: DynamicBuffer,
    terrain_uniform: UniformSlot,
    capsule: IndexedMesh,
    capsule_uniform: UniformSlot,
    draw_capsule: bool,
}

impl MeshRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        capsule_vertices: &[MeshVertex],
        capsule_indices: &[u32],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mesh Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Sculpted solids can expose either side of a face
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let capsule = IndexedMesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Capsule Vertex Buffer"),
                contents: bytemuck::cast_slice(capsule_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Capsule Index Buffer"),
                contents: bytemuck::cast_slice(capsule_indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: capsule_indices.len() as u32,
        };

        Self {
            render_pipeline,
            terrain: DynamicBuffer::new(device, "Terrain Vertex Buffer"),
            terrain_uniform: UniformSlot::new(device, &uniform_layout, "Terrain Uniforms"),
            capsule,
            capsule_uniform: UniformSlot::new(device, &uniform_layout, "Capsule Uniforms"),
            draw_capsule: false,
        }
    }

    /// Replace the terrain triangle list
    pub fn upload_terrain(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[MeshVertex]) {
        self.terrain.upload(device, queue, vertices);
    }

    /// Update per-frame uniforms. The capsule is skipped when `player` is `None`.
    pub fn prepare(&mut self, queue: &wgpu::Queue, view_proj: Mat4, player: Option<Mat4>) {
        self.terrain_uniform
            .write(queue, MeshUniform::new(view_proj, Mat4::IDENTITY));

        self.draw_capsule = player.is_some();
        if let Some(model) = player {
            self.capsule_uniform
                .write(queue, MeshUniform::new(view_proj, model));
        }
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.render_pipeline);

        if !self.terrain.is_empty() {
            render_pass.set_bind_group(0, &self.terrain_uniform.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.terrain.buffer().slice(..));
            render_pass.draw(0..self.terrain.len(), 0..1);
        }

        if self.draw_capsule {
            render_pass.set_bind_group(0, &self.capsule_uniform.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.capsule.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.capsule.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.capsule.index_count, 0, 0..1);
        }
    }

    /// Terrain vertices currently on the GPU
    pub fn terrain_vertex_count(&self) -> u32 {
        self.terrain.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grown_capacity_keeps_room() {
        assert_eq!(grown_capacity(8192, 100), 8192);
        assert_eq!(grown_capacity(8192, 8192), 8192);
    }

    #[test]
    fn test_grown_capacity_rounds_up() {
        assert_eq!(grown_capacity(4096, 5000), 8192);
        assert_eq!(grown_capacity(0, 10), MIN_BUFFER_SIZE);
    }

    #[test]
    fn test_mesh_uniform_layout() {
        assert_eq!(std::mem::size_of::<MeshUniform>(), 128);
        let uniform = MeshUniform::new(Mat4::IDENTITY, Mat4::from_translation(glam::Vec3::X));
        assert_eq!(uniform.model[3][0], 1.0);
    }
}
