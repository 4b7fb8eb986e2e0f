use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use voxel_life::{
    Camera, Rule, SimConfig, Simulation,
    domain::all_rules,
    input::{self, OrbitDrag},
    rendering,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Voxel Life - 3D Cellular Automaton".to_owned(),
        window_width: 1200,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// Config from the first CLI argument, or defaults
fn load_config() -> SimConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimConfig::default();
    };
    SimConfig::load(&path).unwrap_or_else(|err| {
        warn!(%err, path = %path, "could not load config, using defaults");
        SimConfig::default()
    })
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    let sim = Simulation::from_config(&config).or_else(|err| {
        warn!(%err, "invalid config, using defaults");
        Simulation::from_config(&SimConfig::default())
    });
    let Ok(mut sim) = sim else {
        error!("default config rejected");
        return;
    };

    let rules = all_rules();
    let mut selected_rule = rules
        .iter()
        .position(|r| r.notation() == config.rule || r.name() == config.rule)
        .unwrap_or(0);

    let half = sim.dimensions().half_extents();
    let mut camera = Camera::new(half.max_element() as f32);
    let mut drag = OrbitDrag::default();
    info!(cells = sim.dimensions().len(), "starting");

    loop {
        let mouse_pos = mouse_position();

        input::handle_zoom(&mut camera);
        drag.update(&mut camera, mouse_pos);
        sim = input::process_keyboard_input(sim, &mut camera);
        sim = input::process_rule_cycle(sim, &rules, &mut selected_rule);

        sim = sim.tick(get_frame_time());

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        let faces = rendering::draw_grid(&sim, &camera);
        let render_ms = render_start.elapsed().as_secs_f32() * 1000.0;
        rendering::draw_hud(&sim, faces, render_ms);

        next_frame().await;
    }
}
