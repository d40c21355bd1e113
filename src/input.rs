use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::movement::Controls;

pub const TOGGLE_MINIMAP: KeyCode = KeyCode::KeyM;

/// Reads the held keys into movement controls. WASD and arrows both work.
pub fn controls_from_keys(keys_down: &HashSet<KeyCode>) -> Controls {
    let held = |a: KeyCode, b: KeyCode| keys_down.contains(&a) || keys_down.contains(&b);
    Controls {
        forward: held(KeyCode::KeyW, KeyCode::ArrowUp),
        back: held(KeyCode::KeyS, KeyCode::ArrowDown),
        turn_left: held(KeyCode::KeyA, KeyCode::ArrowLeft),
        turn_right: held(KeyCode::KeyD, KeyCode::ArrowRight),
    }
}
