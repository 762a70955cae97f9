//! Cursor drags to camera gestures: left = rotate, right/middle or Ctrl+left = pan.

use winit::event::MouseButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub mode: DragMode,
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<(MouseButton, DragMode)>,
    last: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.active.map(|(_, m)| m)
    }

    /// Start a drag. A second button while one is held does not change the mode.
    pub fn press(&mut self, button: MouseButton, ctrl: bool) {
        if self.active.is_some() {
            return;
        }
        let mode = match button {
            MouseButton::Left if ctrl => DragMode::Pan,
            MouseButton::Left => DragMode::Rotate,
            MouseButton::Right | MouseButton::Middle => DragMode::Pan,
            _ => return,
        };
        self.active = Some((button, mode));
    }

    pub fn release(&mut self, button: MouseButton) {
        if self.active.is_some_and(|(b, _)| b == button) {
            self.active = None;
        }
    }

    pub fn release_all(&mut self) {
        self.active = None;
        self.last = None;
    }

    /// Track the cursor; returns the delta since the last position while a drag is held.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Option<DragGesture> {
        let prev = self.last.replace((x, y))?;
        let (_, mode) = self.active?;
        let (dx, dy) = ((x - prev.0) as f32, (y - prev.1) as f32);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(DragGesture { mode, dx, dy })
    }
}
