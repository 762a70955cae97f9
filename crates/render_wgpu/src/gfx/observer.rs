//! Callbacks from the viewer to whatever shell hosts it.

use std::path::Path;

use viewer_core::{PipelineVariant, ViewerError};

/// All methods default to no-ops so shells implement only what they show.
pub trait ViewerObserver {
    fn mesh_loaded(&mut self, _path: &Path, _vertex_count: usize, _triangle_count: usize) {}

    fn mesh_load_failed(&mut self, _path: &Path, _error: &ViewerError) {}

    /// The variant now bound for drawing, after a successful switch.
    fn pipeline_changed(&mut self, _variant: PipelineVariant) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ViewerObserver for NoopObserver {}
