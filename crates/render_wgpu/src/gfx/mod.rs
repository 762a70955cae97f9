//! Renderer modules.
//! - types.rs: uniform block + vertex buffer layouts
//! - util.rs: surface extent clamp, depth target
//! - mesh.rs / matcap.rs: GPU uploads
//! - pipeline.rs: shader library + pipeline factory
//! - renderer/: the `Viewer` (init, frame, resize, input)

pub mod matcap;
pub mod mesh;
pub mod observer;
pub mod pipeline;
pub mod renderer;
pub mod types;
pub mod util;

pub use mesh::GpuMesh;
pub use observer::{NoopObserver, ViewerObserver};
pub use renderer::{FrameOutcome, Viewer};
