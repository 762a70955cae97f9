//! Per-frame draw plan: everything the renderer records for one frame, computed
//! on the CPU from the session.

use glam::Mat4;

use crate::pipeline::PipelineVariant;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub index_count: u32,
    pub matcap: usize,
    pub variant: PipelineVariant,
}

/// `None` means skip the frame: no mesh, zero-area viewport, or no pipeline bound yet.
pub fn plan_frame<M>(session: &Session<M>, bound: Option<PipelineVariant>) -> Option<FramePlan> {
    let mesh = session.mesh()?;
    let aspect = session.camera.aspect()?;
    let variant = bound?;
    let cam = &session.camera;
    Some(FramePlan {
        model_view: cam.derive_view_matrix(mesh.bounds),
        projection: cam.derive_projection_matrix(aspect),
        index_count: mesh.index_count(),
        matcap: session.current_matcap(),
        variant,
    })
}
