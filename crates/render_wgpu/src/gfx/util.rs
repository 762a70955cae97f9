//! Small helpers used across the renderer.

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Clamp `width`/`height` to `max_dim` while preserving aspect ratio.
pub fn scale_to_max((w0, h0): (u32, u32), max_dim: u32) -> (u32, u32) {
    let (mut w, mut h) = (w0.max(1), h0.max(1));
    if w > max_dim || h > max_dim {
        let scale = (w as f32 / max_dim as f32).max(h as f32 / max_dim as f32);
        w = ((w as f32 / scale).floor() as u32).clamp(1, max_dim);
        h = ((h as f32 / scale).floor() as u32).clamp(1, max_dim);
    }
    (w, h)
}

/// Create a depth texture view sized to the current surface.
pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth-texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Linear RGBA config value to a wgpu clear color.
pub fn clear_color([r, g, b, a]: [f64; 4]) -> wgpu::Color {
    wgpu::Color { r, g, b, a }
}

/// Map a backend name (`MV_BACKEND` / config `backend`) to wgpu backends.
pub fn parse_backend(name: &str) -> Option<wgpu::Backends> {
    match name.trim().to_ascii_lowercase().as_str() {
        "vulkan" | "vk" => Some(wgpu::Backends::VULKAN),
        "gl" | "opengl" | "gles" => Some(wgpu::Backends::GL),
        "metal" | "mtl" => Some(wgpu::Backends::METAL),
        "dx12" | "d3d12" => Some(wgpu::Backends::DX12),
        "primary" | "all" => Some(wgpu::Backends::PRIMARY),
        _ => None,
    }
}

/// Instances to try, in order. An explicit choice still falls back to PRIMARY.
pub fn backend_candidates(requested: Option<&str>) -> Vec<wgpu::Backends> {
    if let Some(name) = requested {
        match parse_backend(name) {
            Some(wgpu::Backends::PRIMARY) => return vec![wgpu::Backends::PRIMARY],
            Some(b) => return vec![b, wgpu::Backends::PRIMARY],
            None => log::warn!("unknown backend `{name}`, using defaults"),
        }
    }
    if cfg!(target_os = "linux") {
        vec![wgpu::Backends::VULKAN, wgpu::Backends::GL, wgpu::Backends::PRIMARY]
    } else {
        vec![wgpu::Backends::PRIMARY, wgpu::Backends::GL]
    }
}

/// Fifo when vsync is on; otherwise the lowest-latency mode the surface offers.
pub fn pick_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|m| available.contains(m))
        .unwrap_or(wgpu::PresentMode::Fifo)
}
