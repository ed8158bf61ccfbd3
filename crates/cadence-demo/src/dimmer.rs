use anyhow::Result;
use cadence_engine::input::Key;
use cadence_engine::{Color, Simulation, Surface};

/// Grey change per fixed update while an arrow key is held.
const STEP: f32 = 0.01;

/// Fades the window between black and white with the Up/Down arrow keys.
#[derive(Debug, Default)]
pub struct Dimmer {
    direction: i8,
    level: f32,
}

fn direction(up: bool, down: bool) -> i8 {
    if up {
        1
    } else if down {
        -1
    } else {
        0
    }
}

impl<S: Surface> Simulation<S> for Dimmer {
    fn input(&mut self, surface: &S) -> Result<()> {
        self.direction = direction(
            surface.is_key_pressed(Key::ArrowUp),
            surface.is_key_pressed(Key::ArrowDown),
        );
        Ok(())
    }

    fn update(&mut self, _interval: f64) -> Result<()> {
        self.level = (self.level + f32::from(self.direction) * STEP).clamp(0.0, 1.0);
        Ok(())
    }

    fn render(&self, surface: &mut S) -> Result<()> {
        if surface.is_resized() {
            let (w, h) = surface.size();
            log::debug!("surface resized to {w}x{h}");
            surface.set_resized(false);
        }

        surface.set_clear_color(Color::grey(self.level));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cadence_engine::window::WindowSurface;

    use super::*;

    fn step(d: &mut Dimmer, dir: i8, times: usize) {
        d.direction = dir;
        for _ in 0..times {
            Simulation::<WindowSurface>::update(d, 1.0 / 30.0).unwrap();
        }
    }

    #[test]
    fn up_wins_over_down() {
        assert_eq!(direction(true, true), 1);
        assert_eq!(direction(false, true), -1);
        assert_eq!(direction(false, false), 0);
    }

    #[test]
    fn level_stays_in_range() {
        let mut d = Dimmer::default();
        step(&mut d, -1, 5);
        assert_eq!(d.level, 0.0);

        step(&mut d, 1, 250);
        assert_eq!(d.level, 1.0);
    }

    #[test]
    fn idle_keeps_level() {
        let mut d = Dimmer::default();
        step(&mut d, 1, 10);
        let before = d.level;
        step(&mut d, 0, 10);
        assert_eq!(d.level, before);
    }
}
