use macroquad::prelude::*;
use crate::application::{Camera, Simulation};
use crate::domain::{LifeLikeRule, Rule};

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Tracks a left-button drag across frames
#[derive(Default)]
pub struct OrbitDrag {
    last_pos: Option<(f32, f32)>,
}

impl OrbitDrag {
    /// Orbit the camera while the left button is held
    pub fn update(&mut self, camera: &mut Camera, mouse_pos: (f32, f32)) {
        if is_mouse_button_down(MouseButton::Left) {
            if let Some(last) = self.last_pos {
                camera.orbit(mouse_pos.0 - last.0, mouse_pos.1 - last.1);
            }
            self.last_pos = Some(mouse_pos);
        } else {
            self.last_pos = None;
        }
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(sim: Simulation, camera: &mut Camera) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 7] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::C, Simulation::clear),
        (KeyCode::R, Simulation::randomize),
        (KeyCode::N, Simulation::step),
        (KeyCode::P, |s| {
            let algorithm = s.algorithm.toggled();
            s.set_algorithm(algorithm)
        }),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    let new_sim = actions.iter().fold(sim, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }

    new_sim
}

/// Cycle through rule presets with Tab
pub fn process_rule_cycle(sim: Simulation, rules: &[LifeLikeRule], selected: &mut usize) -> Simulation {
    if rules.is_empty() || !is_key_pressed(KeyCode::Tab) {
        return sim;
    }

    *selected = (*selected + 1) % rules.len();
    let rule = rules[*selected].clone();
    tracing::debug!(rule = rule.name(), "cycling rule");
    sim.set_rule(Box::new(rule))
}
