//! viewer_core: CPU-side model of the matcap mesh viewer.
//!
//! Mesh data + import boundary, trackball camera, pipeline variants and their
//! cache, matcap selection, session state and the per-frame draw plan. Nothing
//! here touches the GPU, so all of it runs under plain `cargo test`.

pub mod action;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod import;
pub mod matcap;
pub mod mesh;
pub mod pipeline;
pub mod session;

pub use action::Action;
pub use camera::{Camera, CameraConfig, UpAxis};
pub use config::ViewerConfig;
pub use error::{ImportError, PipelineBuildError, ResourceAllocationError, ViewerError};
pub use frame::{FramePlan, plan_frame};
pub use import::{FileImporter, MeshImporter, load_mesh};
pub use matcap::{MatcapImage, MatcapSelection};
pub use mesh::{Aabb, ImportedMesh, MeshData};
pub use pipeline::{Fill, PipelineCache, PipelineFactory, PipelineVariant, Shading};
pub use session::{ActionOutcome, LoadedMesh, Session};
