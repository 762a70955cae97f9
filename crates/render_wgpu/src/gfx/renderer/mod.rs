//! Viewer submodules.
//! - init.rs: adapter/device/surface setup and first pipeline bind
//! - render.rs: one frame per tick from the session's frame plan
//! - resize.rs: surface + depth rebuild on window resize
//! - input.rs: the `on_*` event API used by the shell
//! - attachments.rs: depth target kept in step with the surface

mod attachments;
mod init;
mod input;
mod render;
mod resize;
mod state;

pub use state::{FrameOutcome, Viewer};
