use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crossterm::event::KeyCode;

use crate::input::InputDevice;
use crate::types::Vector2D;

// Terminals report key presses (with autorepeat) but not releases, so a press
// holds its deflection for a few frames and then lets go.
pub const KEY_HOLD_FRAMES: u32 = 8;

#[derive(Default)]
struct KeyboardState {
    deflection: Vector2D,
    hold_x: u32,
    hold_y: u32,
}

/// Arrow keys acting as a single joystick.
pub struct KeyboardStick {
    state: Rc<RefCell<KeyboardState>>,
    max_deflection: f64,
}

/// The driver's side of a [`KeyboardStick`]: feeds it key presses.
#[derive(Clone)]
pub struct KeyboardHandle {
    state: Rc<RefCell<KeyboardState>>,
    max_deflection: f64,
}

impl KeyboardStick {
    pub fn new(max_deflection: i32) -> (Self, KeyboardHandle) {
        let state = Rc::new(RefCell::new(KeyboardState::default()));
        let max_deflection = max_deflection as f64;
        let handle = KeyboardHandle { state: Rc::clone(&state), max_deflection };
        (KeyboardStick { state, max_deflection }, handle)
    }
}

impl KeyboardHandle {
    /// Returns false for keys that don't steer.
    pub fn press(&self, code: KeyCode) -> bool {
        let mut state = self.state.borrow_mut();
        match code {
            KeyCode::Left => {
                state.deflection.x = -self.max_deflection;
                state.hold_x = KEY_HOLD_FRAMES;
            }
            KeyCode::Right => {
                state.deflection.x = self.max_deflection;
                state.hold_x = KEY_HOLD_FRAMES;
            }
            // World y grows upwards.
            KeyCode::Up => {
                state.deflection.y = self.max_deflection;
                state.hold_y = KEY_HOLD_FRAMES;
            }
            KeyCode::Down => {
                state.deflection.y = -self.max_deflection;
                state.hold_y = KEY_HOLD_FRAMES;
            }
            _ => return false,
        }
        true
    }
}

impl InputDevice for KeyboardStick {
    fn read(&mut self) -> Vector2D {
        let mut state = self.state.borrow_mut();
        let reading = state.deflection;
        state.hold_x = state.hold_x.saturating_sub(1);
        state.hold_y = state.hold_y.saturating_sub(1);
        if state.hold_x == 0 {
            state.deflection.x = 0.0;
        }
        if state.hold_y == 0 {
            state.deflection.y = 0.0;
        }
        reading.clamp_axes(self.max_deflection)
    }
}

// --- ScriptedStick for headless runs ---
/// Replays deflections keyed by read index (one read per live tick).
/// Indices without an entry read as centered.
pub struct ScriptedStick {
    readings: HashMap<u64, Vector2D>,
    current_frame: u64,
}

impl ScriptedStick {
    pub fn new(readings: HashMap<u64, Vector2D>) -> Self {
        ScriptedStick { readings, current_frame: 0 }
    }
}

impl InputDevice for ScriptedStick {
    fn read(&mut self) -> Vector2D {
        let reading = self.readings.get(&self.current_frame).copied().unwrap_or(Vector2D::ZERO);
        self.current_frame += 1;
        reading
    }
}
