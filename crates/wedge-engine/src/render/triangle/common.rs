//! Shared helpers for the triangle renderers.

use crate::render::RenderTarget;

/// Number of vertices in every triangle draw call.
pub(super) const TRIANGLE_VERTEX_COUNT: u32 = 3;

/// Begins the triangle render pass over an already-cleared color target.
///
/// Load (not clear): the frame's clear pass has already run.
pub(super) fn begin_triangle_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &'static str,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Opaque color target state (no blending; the original draws opaque).
pub(super) fn opaque_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    }
}
