//! Event API called by the shell: drags, scroll, named actions, mesh loads.
//!
//! Every call mutates state immediately and asks for a redraw; nothing is batched.

use std::path::Path;

use viewer_core::{Action, ActionOutcome, PipelineVariant, UpAxis, ViewerError};

use super::Viewer;
use crate::gfx::mesh::GpuMesh;

impl Viewer {
    pub fn on_drag_rotate(&mut self, dx: f32, dy: f32) {
        self.session.camera.rotate(dx, dy);
        self.window.request_redraw();
    }

    pub fn on_drag_pan(&mut self, dx: f32, dy: f32) {
        self.session.camera.pan(dx, dy);
        self.window.request_redraw();
    }

    pub fn on_scroll_zoom(&mut self, dy: f32) {
        self.session.camera.zoom(dy);
        self.window.request_redraw();
    }

    pub fn on_key_toggle_wireframe(&mut self) {
        self.apply(Action::ToggleWireframe);
    }

    pub fn on_key_toggle_flat(&mut self) {
        self.apply(Action::ToggleFlat);
    }

    pub fn on_key_reset_view(&mut self) {
        self.apply(Action::ResetView);
    }

    pub fn on_key_set_up_axis(&mut self, axis: UpAxis) {
        self.apply(Action::SetUpAxis(axis));
    }

    pub fn on_key_select_matcap(&mut self, index: usize) {
        self.apply(Action::SelectMatcap(index));
    }

    /// Apply a named action. Draw-mode toggles switch pipelines here; a failed
    /// switch leaves the old pipeline bound and the mode flags matching it.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        let outcome = self.session.apply(action);
        match outcome {
            ActionOutcome::PipelineChange(variant) => {
                self.switch_pipeline(variant);
                self.window.request_redraw();
            }
            ActionOutcome::ViewChanged => self.window.request_redraw(),
            ActionOutcome::Ignored => log::debug!("ignored {action:?}"),
        }
        outcome
    }

    fn switch_pipeline(&mut self, variant: PipelineVariant) -> bool {
        // File-backed shaders recompile on every toggle so edits show up.
        let rebuild = self.pipelines.factory().shaders().is_file_backed();
        match self.pipelines.activate(variant, rebuild) {
            Ok(()) => {
                self.observer.pipeline_changed(variant);
                true
            }
            Err(_) => {
                if let Some(bound) = self.pipelines.active_variant() {
                    self.session.revert_modes(bound);
                }
                false
            }
        }
    }

    /// Import, validate and upload `path`, then swap it in. On any failure the
    /// current mesh keeps rendering and `false` is returned.
    pub fn on_load_mesh(&mut self, path: &Path) -> bool {
        let device = &self.device;
        let result = self.session.load_mesh(self.importer.as_ref(), path, |data| {
            GpuMesh::upload(device, data).map_err(ViewerError::from)
        });
        match result {
            Ok(mesh) => {
                let (verts, tris) = (mesh.vertex_count, mesh.triangle_count);
                self.observer.mesh_loaded(path, verts, tris);
                self.window.request_redraw();
                true
            }
            Err(e) => {
                log::error!("load {} failed: {e}", path.display());
                self.observer.mesh_load_failed(path, &e);
                false
            }
        }
    }
}
