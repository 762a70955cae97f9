//! Keyboard to named actions.
//!
//! Letters are matched on the logical key first so they follow the user's layout;
//! physical codes are the fallback for keys that produce no text.

use viewer_core::{Action, UpAxis};
use winit::keyboard::{Key, KeyCode};

/// `f` flat, `w` wire, `r` reset, `x`/`y`/`z` up axis, `1`..`9` matcap slots.
pub fn action_for_char(text: &str) -> Option<Action> {
    let mut chars = text.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    match c {
        'f' => Some(Action::ToggleFlat),
        'w' => Some(Action::ToggleWireframe),
        'r' => Some(Action::ResetView),
        'x' => Some(Action::SetUpAxis(UpAxis::X)),
        'y' => Some(Action::SetUpAxis(UpAxis::Y)),
        'z' => Some(Action::SetUpAxis(UpAxis::Z)),
        '1'..='9' => Some(Action::SelectMatcap(c as usize - '1' as usize)),
        _ => None,
    }
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let slot = |i: usize| Some(Action::SelectMatcap(i));
    match code {
        KeyCode::KeyF => Some(Action::ToggleFlat),
        KeyCode::KeyW => Some(Action::ToggleWireframe),
        KeyCode::KeyR => Some(Action::ResetView),
        KeyCode::KeyX => Some(Action::SetUpAxis(UpAxis::X)),
        KeyCode::KeyY => Some(Action::SetUpAxis(UpAxis::Y)),
        KeyCode::KeyZ => Some(Action::SetUpAxis(UpAxis::Z)),
        KeyCode::Digit1 | KeyCode::Numpad1 => slot(0),
        KeyCode::Digit2 | KeyCode::Numpad2 => slot(1),
        KeyCode::Digit3 | KeyCode::Numpad3 => slot(2),
        KeyCode::Digit4 | KeyCode::Numpad4 => slot(3),
        KeyCode::Digit5 | KeyCode::Numpad5 => slot(4),
        KeyCode::Digit6 | KeyCode::Numpad6 => slot(5),
        KeyCode::Digit7 | KeyCode::Numpad7 => slot(6),
        KeyCode::Digit8 | KeyCode::Numpad8 => slot(7),
        KeyCode::Digit9 | KeyCode::Numpad9 => slot(8),
        _ => None,
    }
}

/// Resolve a key event: logical text if it maps, else the physical code.
pub fn action_for_event(logical: &Key, physical: Option<KeyCode>) -> Option<Action> {
    if let Key::Character(s) = logical
        && let Some(a) = action_for_char(s)
    {
        return Some(a);
    }
    physical.and_then(action_for_key)
}
