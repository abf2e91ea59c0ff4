use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::common::{begin_triangle_pass, opaque_target, TRIANGLE_VERTEX_COUNT};

/// Camera parameters read by the shaded vertex stage.
///
/// The backing uniform buffer is created zero-filled and never written: the
/// original program's camera-update hook was disabled, so pan/zoom/aspect
/// always read as zero. With zoom = 0 the triangle collapses to a point and
/// nothing visible is produced. That behavior is reproduced here on purpose;
/// do not wire up a camera without revisiting the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub pan: [f32; 2],
    pub zoom: f32,
    pub aspect: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ShadedVertex {
    pos: [f32; 3],
}

impl ShadedVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShadedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The fixed triangle, in upload order (apex, bottom-left, bottom-right).
const VERTICES: [ShadedVertex; 3] = [
    ShadedVertex { pos: [0.0, 0.5, 0.0] },
    ShadedVertex { pos: [-0.5, -0.5, 0.0] },
    ShadedVertex { pos: [0.5, -0.5, 0.0] },
];

/// Renderer for the shaded (camera-uniform) triangle variant.
///
/// GPU resources are created lazily on first render and the pipeline is
/// rebuilt only if the surface format changes.
#[derive(Default)]
pub struct ShadedTriangle {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
}

impl ShadedTriangle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one draw call of 3 vertices into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_vertex_buffer(ctx);
        self.ensure_bindings(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut rpass = begin_triangle_pass(target, "wedge shaded triangle pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..TRIANGLE_VERTEX_COUNT, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/shaded.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wedge shaded triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("wedge shaded triangle bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(camera_ubo_min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("wedge shaded triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wedge shaded triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ShadedVertex::layout()],
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
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wedge shaded triangle vbo"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        // wgpu guarantees zero-initialized buffer contents; no COPY_DST,
        // nothing ever writes this buffer (see `CameraUniform`).
        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wedge shaded triangle camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wedge shaded triangle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Minimum binding size for the camera uniform buffer.
fn camera_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
        .expect("CameraUniform has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex data ───────────────────────────────────────────────────────

    #[test]
    fn uploads_exactly_three_vertices() {
        assert_eq!(VERTICES.len(), 3);
        assert_eq!(TRIANGLE_VERTEX_COUNT, 3);
    }

    #[test]
    fn vertex_literals_match_the_fixed_triangle() {
        assert_eq!(VERTICES[0].pos, [0.0, 0.5, 0.0]);
        assert_eq!(VERTICES[1].pos, [-0.5, -0.5, 0.0]);
        assert_eq!(VERTICES[2].pos, [0.5, -0.5, 0.0]);
    }

    #[test]
    fn vertex_stride_is_three_floats() {
        assert_eq!(std::mem::size_of::<ShadedVertex>(), 12);
        assert_eq!(ShadedVertex::layout().array_stride, 12);
    }

    // ── camera uniform ────────────────────────────────────────────────────

    #[test]
    fn camera_uniform_is_16_bytes() {
        // Matches the WGSL struct layout: vec2f + f32 + f32.
        assert_eq!(std::mem::size_of::<CameraUniform>(), 16);
        assert_eq!(u64::from(camera_ubo_min_binding_size()), 16);
    }

    #[test]
    fn zeroed_camera_reads_all_zero() {
        // The GPU buffer is zero-initialized and never written; the CPU-side
        // mirror of that state is the Zeroable default.
        let cam: CameraUniform = Zeroable::zeroed();
        assert_eq!(cam.pan, [0.0, 0.0]);
        assert_eq!(cam.zoom, 0.0);
        assert_eq!(cam.aspect, 0.0);
    }
}
