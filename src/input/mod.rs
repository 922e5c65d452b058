use std::collections::{HashSet, HashMap};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

/// Raw keyboard state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down.  OS auto-repeat (a press for a key already held)
    /// does not count as a new press.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if self.keys_held.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Forget every held key, e.g. when the window loses focus and the
    /// matching key-ups will never arrive.
    pub fn release_all(&mut self) {
        self.keys_released.extend(self.keys_held.drain());
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions (defined by the game) to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(mut self, action: A, key: KeyCode) -> Self {
        self.bindings.entry(action).or_default().push(key);
        self
    }

    /// Returns true if the action was triggered this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|k| input.is_key_pressed(*k))
    }

    /// Returns true if any key bound to the action is down.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|k| input.is_key_held(*k))
    }

    fn keys(&self, action: A) -> &[KeyCode] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Steering ─────────────────────────────────────────────────────────────────

/// Horizontal steering from two independent held flags.
///
/// Holding both or neither yields no motion; the result is always one of
/// -1, 0 or 1 however the key events interleave.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

impl Steering {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_repeat_is_not_a_new_press() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyR);
        input.clear_frame_state();
        input.press(KeyCode::KeyR);
        assert!(!input.is_key_pressed(KeyCode::KeyR));
        assert!(input.is_key_held(KeyCode::KeyR));
    }

    #[test]
    fn release_all_reports_released_keys() {
        let mut input = InputState::new();
        input.press(KeyCode::ArrowLeft);
        input.release_all();
        assert!(!input.is_key_held(KeyCode::ArrowLeft));
        assert!(input.is_key_released(KeyCode::ArrowLeft));
    }
}
