use std::collections::HashSet;

use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};

/// Input snapshot read by `Simulation::input`.
///
/// Held keys/buttons persist across loop iterations. The `*_pressed` and
/// `*_released` sets only describe transitions seen since the last
/// `begin_iteration()` call, i.e. during the most recent event pump.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,

    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
}

impl InputState {
    /// Drops last iteration's transitions. Call right before pumping new events.
    pub fn begin_iteration(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(key) {
                        self.keys_pressed.insert(key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(&key) {
                        self.keys_released.insert(key);
                    }
                }
            },

            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(button) {
                        self.buttons_pressed.insert(button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(&button) {
                        self.buttons_released.insert(button);
                    }
                }
            },

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_is_held_across_iterations() {
        let mut input = InputState::default();
        input.apply(key(Key::ArrowUp, ButtonState::Pressed));
        assert!(input.key_down(Key::ArrowUp));
        assert!(input.key_pressed(Key::ArrowUp));

        input.begin_iteration();
        assert!(input.key_down(Key::ArrowUp));
        assert!(!input.key_pressed(Key::ArrowUp));
    }

    #[test]
    fn repeat_press_is_not_a_new_transition() {
        let mut input = InputState::default();
        input.apply(key(Key::Space, ButtonState::Pressed));
        input.begin_iteration();
        input.apply(InputEvent::Key { key: Key::Space, state: ButtonState::Pressed, repeat: true });
        assert!(!input.key_pressed(Key::Space));
    }

    #[test]
    fn release_records_transition() {
        let mut input = InputState::default();
        input.apply(key(Key::Escape, ButtonState::Pressed));
        input.begin_iteration();
        input.apply(key(Key::Escape, ButtonState::Released));
        assert!(!input.key_down(Key::Escape));
        assert!(input.key_released(Key::Escape));
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut input = InputState::default();
        input.apply(key(Key::W, ButtonState::Pressed));
        input.apply(InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed });
        input.apply(InputEvent::Focused(false));
        assert!(!input.key_down(Key::W));
        assert!(!input.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_tracks_position_until_leave() {
        let mut input = InputState::default();
        input.apply(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(input.pointer_pos, Some((3.0, 4.0)));
        input.apply(InputEvent::PointerLeft);
        assert_eq!(input.pointer_pos, None);
    }
}
