//! Viewer session state: one camera, one mesh slot, draw modes, matcap choice.
//!
//! `M` is whatever the renderer keeps per mesh (GPU buffers in practice). The
//! session never exposes a half-built mesh: a load builds `M` completely and only
//! then swaps it in.

use std::path::Path;

use crate::action::Action;
use crate::camera::{Camera, CameraConfig, UpAxis};
use crate::error::ViewerError;
use crate::import::{MeshImporter, load_mesh};
use crate::matcap::MatcapSelection;
use crate::mesh::{Aabb, MeshData};
use crate::pipeline::PipelineVariant;

/// Current mesh plus the CPU facts the renderer needs each frame.
#[derive(Debug)]
pub struct LoadedMesh<M> {
    pub bounds: Aabb,
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub handle: M,
}

impl<M> LoadedMesh<M> {
    pub fn index_count(&self) -> u32 {
        (self.triangle_count * 3) as u32
    }
}

/// What the shell/renderer has to do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Draw mode flipped; compile/bind this variant.
    PipelineChange(PipelineVariant),
    /// Camera or matcap changed; the next frame picks it up.
    ViewChanged,
    Ignored,
}

#[derive(Debug)]
pub struct Session<M> {
    pub camera: Camera,
    mesh: Option<LoadedMesh<M>>,
    wireframe: bool,
    flat: bool,
    matcaps: MatcapSelection,
}

impl<M> Session<M> {
    pub fn new(cfg: CameraConfig, matcap_count: usize) -> Self {
        Self {
            camera: Camera::new(cfg),
            mesh: None,
            wireframe: false,
            flat: false,
            matcaps: MatcapSelection::new(matcap_count),
        }
    }

    pub fn mesh(&self) -> Option<&LoadedMesh<M>> {
        self.mesh.as_ref()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.mesh.as_ref().map(|m| m.bounds)
    }

    pub fn matcaps(&self) -> MatcapSelection {
        self.matcaps
    }

    pub fn current_matcap(&self) -> usize {
        self.matcaps.current()
    }

    /// Draw modes the user asked for.
    pub fn requested_variant(&self) -> PipelineVariant {
        PipelineVariant::from_flags(self.wireframe, self.flat)
    }

    /// Import `path`, hand the validated data to `upload`, and on success make the
    /// result current and refit the camera distance. Any failure leaves the
    /// previous mesh untouched.
    pub fn load_mesh<U>(
        &mut self,
        importer: &dyn MeshImporter,
        path: &Path,
        upload: U,
    ) -> Result<&LoadedMesh<M>, ViewerError>
    where
        U: FnOnce(&MeshData) -> Result<M, ViewerError>,
    {
        let data = load_mesh(importer, path)?;
        let handle = upload(&data)?;
        Ok(self.install(&data, handle))
    }

    /// Make already-built mesh data current.
    pub fn install(&mut self, data: &MeshData, handle: M) -> &LoadedMesh<M> {
        let mesh = LoadedMesh {
            bounds: data.bounds(),
            triangle_count: data.triangle_count(),
            vertex_count: data.vertex_count(),
            handle,
        };
        self.camera.reset_proximity(mesh.bounds);
        self.mesh.insert(mesh)
    }

    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::ToggleWireframe => {
                self.wireframe = !self.wireframe;
                ActionOutcome::PipelineChange(self.requested_variant())
            }
            Action::ToggleFlat => {
                self.flat = !self.flat;
                ActionOutcome::PipelineChange(self.requested_variant())
            }
            Action::ResetView => {
                self.camera.reset(self.bounds());
                ActionOutcome::ViewChanged
            }
            Action::SetUpAxis(axis) => {
                self.set_up_axis(axis);
                ActionOutcome::ViewChanged
            }
            Action::SelectMatcap(i) => {
                if self.matcaps.select(i) {
                    ActionOutcome::ViewChanged
                } else {
                    ActionOutcome::Ignored
                }
            }
        }
    }

    pub fn set_up_axis(&mut self, axis: UpAxis) {
        self.camera.set_up_axis(axis);
    }

    /// Bring the mode flags back in line with the pipeline actually bound, after a
    /// rebuild was rejected.
    pub fn revert_modes(&mut self, bound: PipelineVariant) {
        self.wireframe = bound.wireframe();
        self.flat = bound.flat();
    }

    /// Set both flags at once (startup options).
    pub fn set_modes(&mut self, wireframe: bool, flat: bool) {
        self.wireframe = wireframe;
        self.flat = flat;
    }
}
