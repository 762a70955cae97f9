//! Viewer resize: swapchain + depth rebuild and camera viewport.

use winit::dpi::PhysicalSize;

use super::Viewer;
use crate::gfx::util;

impl Viewer {
    /// Store the new viewport. The next frame derives its projection from it, so there
    /// is never a frame with a stale aspect ratio. A zero-area size only parks the
    /// camera viewport; frames are skipped until a real size arrives.
    pub fn on_resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            self.session.camera.set_viewport(0, 0);
            return;
        }
        let (w, h) = util::scale_to_max((new_size.width, new_size.height), self.max_dim);
        if (w, h) != (new_size.width, new_size.height) {
            log::debug!(
                "Resized {}x{} exceeds max {}, clamped to {}x{} (aspect kept)",
                new_size.width,
                new_size.height,
                self.max_dim,
                w,
                h
            );
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
        self.attachments.rebuild(&self.device, w, h);
        self.session.camera.set_viewport(w, h);
        self.window.request_redraw();
    }

    /// Reconfigure after `SurfaceError::Lost/Outdated` using the window's current size.
    pub fn reconfigure_surface(&mut self) {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.on_resize(size);
    }
}
