use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::common::{begin_triangle_pass, opaque_target, TRIANGLE_VERTEX_COUNT};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FlatVertex {
    pos: [f32; 2],
}

impl FlatVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The fixed triangle, in upload order (apex, bottom-right, bottom-left).
const VERTICES: [FlatVertex; 3] = [
    FlatVertex { pos: [0.0, 0.5] },
    FlatVertex { pos: [0.5, -0.5] },
    FlatVertex { pos: [-0.5, -0.5] },
];

/// Renderer for the flat white triangle variant.
///
/// No uniforms: 2-float positions pass through at z = 0 and fragments are
/// opaque white. Resources are created lazily on first render.
#[derive(Default)]
pub struct FlatTriangle {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    vbo: Option<wgpu::Buffer>,
}

impl FlatTriangle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one draw call of 3 vertices into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_vertex_buffer(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut rpass = begin_triangle_pass(target, "wedge flat triangle pass");
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..TRIANGLE_VERTEX_COUNT, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/flat.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wedge flat triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("wedge flat triangle pipeline layout"),
                    bind_group_layouts: &[],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wedge flat triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[FlatVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(opaque_target(ctx.surface_format))],
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

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wedge flat triangle vbo"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploads_exactly_three_vertices() {
        assert_eq!(VERTICES.len(), 3);
    }

    #[test]
    fn vertex_literals_match_the_fixed_triangle() {
        assert_eq!(VERTICES[0].pos, [0.0, 0.5]);
        assert_eq!(VERTICES[1].pos, [0.5, -0.5]);
        assert_eq!(VERTICES[2].pos, [-0.5, -0.5]);
    }

    #[test]
    fn vertex_stride_is_two_floats() {
        assert_eq!(std::mem::size_of::<FlatVertex>(), 8);
        assert_eq!(FlatVertex::layout().array_stride, 8);
    }
}
