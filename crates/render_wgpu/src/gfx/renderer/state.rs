//! Viewer state: the struct and frame outcome.

use std::sync::Arc;

use viewer_core::{MeshImporter, PipelineCache, Session};
use winit::window::Window;

use super::attachments::Attachments;
use crate::gfx::matcap::GpuMatcaps;
use crate::gfx::mesh::GpuMesh;
use crate::gfx::observer::ViewerObserver;
use crate::gfx::pipeline::WgpuPipelineFactory;

/// Result of one `on_frame_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The mesh was drawn and the frame presented.
    Drawn,
    /// No draw call: no mesh, zero-area viewport, or nothing bound yet.
    Skipped,
}

pub struct Viewer {
    // --- GPU & Surface ---
    pub(crate) window: Arc<Window>,
    pub(crate) surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) config: wgpu::SurfaceConfiguration,
    pub(crate) max_dim: u32,
    pub(crate) attachments: Attachments,
    pub(crate) clear_color: wgpu::Color,

    // --- Per-frame uniforms ---
    pub(crate) uniform_buf: wgpu::Buffer,
    pub(crate) uniform_bg: wgpu::BindGroup,

    // --- Pipelines & textures ---
    pub(crate) pipelines: PipelineCache<WgpuPipelineFactory>,
    pub(crate) matcaps: GpuMatcaps,

    // --- Session ---
    pub(crate) session: Session<GpuMesh>,
    pub(crate) importer: Box<dyn MeshImporter>,
    pub(crate) observer: Box<dyn ViewerObserver>,
}

impl Viewer {
    pub fn session(&self) -> &Session<GpuMesh> {
        &self.session
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn matcap_name(&self, index: usize) -> Option<&str> {
        self.matcaps.name(index)
    }

    pub fn supports_wireframe(&self) -> bool {
        self.pipelines.factory().supports_wireframe()
    }

    pub fn set_observer(&mut self, observer: Box<dyn ViewerObserver>) {
        self.observer = observer;
    }

    pub fn set_importer(&mut self, importer: Box<dyn MeshImporter>) {
        self.importer = importer;
    }
}
