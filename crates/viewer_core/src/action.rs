//! Named discrete input actions. Shells translate platform key codes into these.

use crate::camera::UpAxis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleWireframe,
    ToggleFlat,
    ResetView,
    SetUpAxis(UpAxis),
    /// Zero-based slot; out-of-range slots are ignored.
    SelectMatcap(usize),
}
