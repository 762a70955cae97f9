//! Depth attachment kept in step with the surface size.

use crate::gfx::util;

#[derive(Debug)]
pub(crate) struct Attachments {
    pub depth_view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl Attachments {
    pub fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        Self {
            depth_view: util::create_depth_view(device, width, height),
            width,
            height,
        }
    }

    pub fn rebuild(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.width == width && self.height == height {
            // Idempotent for equal sizes
            return;
        }
        *self = Self::create(device, width, height);
    }
}
