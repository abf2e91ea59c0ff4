/// Initialization parameters for the GPU layer.
///
/// Every field is a request, not a guarantee: the surface layer substitutes
/// the closest supported value when the platform cannot honor one.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Requested present mode (swap behavior).
    ///
    /// `Immediate` asks for unthrottled presentation (no vsync wait). If the
    /// surface does not support the requested mode, a supported one is
    /// selected silently, `Fifo` as the last resort.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode
    /// is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    ///
    /// Favor an empty set for portability unless a feature is strictly
    /// necessary.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Preset requesting immediate (unsynchronized) presentation.
    ///
    /// Best effort: platforms without `Immediate` support fall back to a
    /// supported mode with no error surfaced.
    pub fn unsynchronized() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Immediate,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_fifo() {
        assert_eq!(GpuInit::default().present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn unsynchronized_requests_immediate() {
        let init = GpuInit::unsynchronized();
        assert_eq!(init.present_mode, wgpu::PresentMode::Immediate);
        assert!(init.prefer_srgb);
    }
}
