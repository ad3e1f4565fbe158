// HUD text rendering

use super::mesh::DynamicBuffer;
use super::texture::{Texture, DEPTH_FORMAT};
use super::vertex::TextVertex;
use crate::engine::assets::GlyphAtlas;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

/// Lay out lines of text as glyph quads (six vertices each), in pixels with
/// a top-left origin. Whitespace and missing glyphs advance the pen without
/// emitting geometry.
pub fn layout_text(atlas: &GlyphAtlas, lines: &[String], origin: Vec2, color: Vec4) -> Vec<TextVertex> {
    let mut vertices = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let baseline = origin.y + atlas.line.ascent + row as f32 * atlas.line.line_height;
        let mut pen_x = origin.x;

        for ch in line.chars() {
            let Some(glyph) = atlas.glyph(ch) else {
                continue;
            };

            if !glyph.region.is_empty() {
                let min = Vec2::new(pen_x, baseline) + glyph.offset;
                let max = min + Vec2::new(glyph.region.width as f32, glyph.region.height as f32);
                let (uv_min, uv_max) = (glyph.region.uv_min, glyph.region.uv_max);

                let top_left = TextVertex::new(min, uv_min, color);
                let top_right = TextVertex::new(Vec2::new(max.x, min.y), Vec2::new(uv_max.x, uv_min.y), color);
                let bottom_left = TextVertex::new(Vec2::new(min.x, max.y), Vec2::new(uv_min.x, uv_max.y), color);
                let bottom_right = TextVertex::new(max, uv_max, color);

                vertices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    bottom_right,
                    top_left,
                    bottom_right,
                    top_right,
                ]);
            }

            pen_x += glyph.advance;
        }
    }

    vertices
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ScreenUniform {
    size: [f32; 2],
    _padding: [f32; 2],
}

/// Draws overlay text on top of the scene
pub struct TextRenderer {
    render_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertices: DynamicBuffer,
    atlas: GlyphAtlas,
    // Keeps the atlas texture alive for the bind group
    _texture: Texture,
}

impl TextRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        atlas: GlyphAtlas,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Text Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let texture = Texture::from_glyph_atlas(device, queue, &atlas);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Text Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Buffer"),
            contents: bytemuck::cast_slice(&[ScreenUniform {
                size: [1.0, 1.0],
                _padding: [0.0; 2],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Text Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: screen_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Text Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[TextVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Shares the scene pass: always on top, never writes depth
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
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

        Self {
            render_pipeline,
            screen_buffer,
            bind_group,
            vertices: DynamicBuffer::new(device, "Text Vertex Buffer"),
            atlas,
            _texture: texture,
        }
    }

    /// Lay out and upload this frame's lines
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        screen: Vec2,
        lines: &[String],
    ) {
        queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::cast_slice(&[ScreenUniform {
                size: screen.to_array(),
                _padding: [0.0; 2],
            }]),
        );

        let vertices = layout_text(&self.atlas, lines, Vec2::ZERO, Vec4::ONE);
        self.vertices.upload(device, queue, &vertices);
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.vertices.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.draw(0..self.vertices.len(), 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::test_atlas;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_six_vertices_per_visible_glyph() {
        let atlas = test_atlas();
        let vertices = layout_text(&atlas, &lines(&["ab c"]), Vec2::ZERO, Vec4::ONE);
        assert_eq!(vertices.len(), 18);
    }

    #[test]
    fn test_pen_advances_and_baseline() {
        let atlas = test_atlas();
        let vertices = layout_text(&atlas, &lines(&["ab"]), Vec2::ZERO, Vec4::ONE);

        // First quad: top-left at pen + bearing, baseline 12 minus glyph height 8
        assert_eq!(vertices[0].position, [1.0, 4.0]);
        // Second glyph starts one advance (10) further
        assert_eq!(vertices[6].position, [11.0, 4.0]);
        // Bottom-right corner sits on the baseline
        assert_eq!(vertices[2].position, [9.0, 12.0]);
    }

    #[test]
    fn test_lines_stack_by_line_height() {
        let atlas = test_atlas();
        let vertices = layout_text(&atlas, &lines(&["a", "b"]), Vec2::new(5.0, 0.0), Vec4::ONE);

        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].position, [6.0, 4.0]);
        assert_eq!(vertices[6].position, [6.0, 20.0]);
    }

    #[test]
    fn test_uvs_come_from_atlas() {
        let atlas = test_atlas();
        let region = atlas.glyph('q').unwrap().region;
        let vertices = layout_text(&atlas, &lines(&["q"]), Vec2::ZERO, Vec4::ONE);

        assert_eq!(vertices[0].tex_coords, region.uv_min.to_array());
        assert_eq!(vertices[2].tex_coords, region.uv_max.to_array());
    }

    #[test]
    fn test_color_is_applied() {
        let atlas = test_atlas();
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let vertices = layout_text(&atlas, &lines(&["x"]), Vec2::ZERO, red);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_empty_input() {
        let atlas = test_atlas();
        assert!(layout_text(&atlas, &[], Vec2::ZERO, Vec4::ONE).is_empty());
        assert!(layout_text(&atlas, &lines(&["   "]), Vec2::ZERO, Vec4::ONE).is_empty());
    }
}
