//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Surfaces translate platform events into `InputEvent`s and fold them into an
//! `InputState`, which simulations poll once per loop iteration.

pub(crate) mod platform {
    pub(crate) mod winit;
}

mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
