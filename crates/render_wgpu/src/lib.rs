//! render_wgpu: GPU side of the matcap viewer.
//!
//! Owns surface/device setup, mesh and matcap uploads, the WGSL shader library,
//! the wgpu pipeline factory and the `Viewer` that runs one frame per tick.

pub mod gfx;
pub use gfx::*;
