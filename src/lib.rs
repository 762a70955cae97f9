//! matcap_viewer: binary support (CLI) plus re-exports of the workspace crates.

pub mod cli;

pub use platform_winit;
pub use render_wgpu;
pub use viewer_core;
