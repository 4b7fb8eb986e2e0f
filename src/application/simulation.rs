use std::time::Instant;

use tracing::{debug, info};

use crate::application::SimConfig;
use crate::domain::{
    Algorithm, AnimFace, CellGrid, DEFAULT_LIVE_PROBABILITY, GridDimensions, GridState, MeshBuffers, Rule,
};
use crate::error::ConfigResult;

/// Simulation orchestrates generations and their animated transitions.
///
/// A generation is computed all at once when its interval elapses; between
/// ticks the face list is only re-evaluated at the current progress.
pub struct Simulation {
    pub state: GridState,
    pub faces: Vec<AnimFace>,
    pub rule: Box<dyn Rule>,
    pub algorithm: Algorithm,
    pub is_running: bool,
    pub generation: u64,
    pub elapsed: f32,
    pub updates_per_second: f32,
    pub animation_duration: f32,
    pub live_probability: f64,
    pub last_update_time_ms: f32,
    pub last_mesh_time_ms: f32,
}

impl Simulation {
    /// Start from `grid` with no transition in flight
    pub fn new(grid: CellGrid, rule: Box<dyn Rule>) -> Self {
        let state = GridState::make_from_grid(grid);
        let faces = AnimFace::build_all(&state);
        Self {
            state,
            faces,
            rule,
            algorithm: Algorithm::default(),
            is_running: false,
            generation: 0,
            elapsed: 0.0,
            updates_per_second: 2.0,
            animation_duration: 0.4,
            live_probability: DEFAULT_LIVE_PROBABILITY,
            last_update_time_ms: 0.0,
            last_mesh_time_ms: 0.0,
        }
    }

    /// Seed a random grid, fast-forward the warm-up generations and start
    /// running.
    pub fn from_config(config: &SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        let rule = config.parsed_rule()?;
        let states = rule.states();

        let seed = CellGrid::make_random(config.dimensions(), config.live_probability, states);
        let warmed = GridState::skip_updates(&GridState::make_from_grid(seed), &rule, config.warmup_generations);
        info!(
            rule = %config.rule,
            cells = warmed.grid().cells().len(),
            population = warmed.grid().population(),
            "seeded simulation"
        );

        let mut sim = Self::new(warmed.grid().clone(), Box::new(rule));
        sim.algorithm = config.algorithm;
        sim.updates_per_second = 1.0 / config.generation_interval;
        sim.animation_duration = config.animation_duration;
        sim.live_probability = config.live_probability;
        sim.generation = config.warmup_generations as u64;
        sim.is_running = true;
        Ok(sim)
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.state.grid().dimensions()
    }

    pub fn generation_interval(&self) -> f32 {
        1.0 / self.updates_per_second
    }

    /// Transition progress in [0, 1]. The animation never runs longer than
    /// one generation interval.
    pub fn progress(&self) -> f32 {
        let duration = self.animation_duration.min(self.generation_interval());
        if duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / duration).min(1.0)
    }

    /// Buffers for the current frame
    pub fn mesh(&self) -> MeshBuffers {
        MeshBuffers::build(&self.faces, self.progress())
    }

    /// Set the cellular automaton rule. A rule with a different palette
    /// reseeds the grid.
    pub fn set_rule(mut self, rule: Box<dyn Rule>) -> Self {
        let states = rule.states();
        info!(rule = rule.name(), states, "switched rule");
        self.rule = rule;
        if states != self.state.grid().states() {
            let grid = CellGrid::make_random(self.dimensions(), self.live_probability, states);
            self = self.reseed(grid);
        }
        self
    }

    /// Set the evolution algorithm
    pub fn set_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Fade everything out and reset the generation counter
    pub fn clear(self) -> Self {
        let grid = CellGrid::make_empty(self.dimensions(), self.state.grid().states());
        self.reseed(grid)
    }

    /// Transition to a fresh random grid and reset the generation counter
    pub fn randomize(self) -> Self {
        let grid = CellGrid::make_random(self.dimensions(), self.live_probability, self.state.grid().states());
        self.reseed(grid)
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(0.5, 30.0);
        self
    }

    /// Advance the clock by one frame, computing a generation when due
    pub fn tick(mut self, delta_time: f32) -> Self {
        self.elapsed += delta_time;
        if self.is_running && self.elapsed >= self.generation_interval() {
            self = self.step();
        }
        self
    }

    /// Compute the next generation now
    pub fn step(mut self) -> Self {
        let start = Instant::now();
        self.state = self.algorithm.update(&self.state, self.rule.as_ref());
        self.last_update_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        self.rebuild_faces();
        self.generation += 1;
        debug!(
            generation = self.generation,
            population = self.state.grid().population(),
            faces = self.faces.len(),
            update_ms = self.last_update_time_ms,
            mesh_ms = self.last_mesh_time_ms,
            "advanced generation"
        );
        self
    }

    /// Animate from the current grid to `grid`
    fn reseed(mut self, grid: CellGrid) -> Self {
        let previous = self.state.grid().clone();
        self.state = if previous.dimensions() == grid.dimensions() && previous.states() == grid.states() {
            GridState::make_transition(previous, grid.clone()).unwrap_or_else(|| GridState::make_from_grid(grid))
        } else {
            GridState::make_from_grid(grid)
        };
        self.rebuild_faces();
        self.generation = 0;
        info!(population = self.state.grid().population(), "reseeded grid");
        self
    }

    fn rebuild_faces(&mut self) {
        let start = Instant::now();
        self.faces = self.algorithm.build_faces(&self.state);
        self.last_mesh_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_rule;
    use glam::IVec3;

    fn lone_cell_sim() -> Simulation {
        let grid = CellGrid::make_empty(GridDimensions::new(1, 1, 1), 2).with_cell(IVec3::ZERO, 1);
        Simulation::new(grid, Box::new(|c: u8, _: u8| u8::from(c > 0)))
    }

    #[test]
    fn test_new_is_settled_and_paused() {
        let sim = lone_cell_sim();
        assert!(!sim.is_running);
        assert!(sim.state.is_settled());
        assert_eq!(sim.faces.len(), 3);
        assert_eq!(sim.generation, 0);
    }

    #[test]
    fn test_paused_tick_only_advances_progress() {
        let sim = lone_cell_sim().tick(10.0);
        assert_eq!(sim.generation, 0);
        assert_eq!(sim.progress(), 1.0);
    }

    #[test]
    fn test_running_tick_advances_on_interval() {
        let mut sim = lone_cell_sim().toggle_running();
        sim.updates_per_second = 4.0;

        let sim = sim.tick(0.1);
        assert_eq!(sim.generation, 0);
        let sim = sim.tick(0.2);
        assert_eq!(sim.generation, 1);
        assert_eq!(sim.elapsed, 0.0);
        assert_eq!(sim.progress(), 0.0);
    }

    #[test]
    fn test_progress_is_capped_by_interval() {
        let mut sim = lone_cell_sim();
        sim.updates_per_second = 10.0;
        sim.animation_duration = 1.0;
        sim.elapsed = 0.05;
        assert!((sim.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_keeps_lone_cell() {
        let sim = lone_cell_sim().step();
        assert_eq!(sim.generation, 1);
        assert_eq!(sim.faces.len(), 3);
        assert!(sim.faces.iter().all(|f| matches!(f, AnimFace::AoTransition { .. })));
    }

    #[test]
    fn test_clear_fades_out() {
        let sim = lone_cell_sim().step().clear();
        assert_eq!(sim.generation, 0);
        assert_eq!(sim.state.grid().population(), 0);
        assert_eq!(sim.faces.len(), 3);
        assert!(sim.faces.iter().all(|f| matches!(f, AnimFace::Disappearing { .. })));
        assert_eq!(sim.mesh().face_count(), 3);
    }

    #[test]
    fn test_set_rule_with_new_palette_reseeds() {
        let sim = lone_cell_sim();
        let sim = sim.set_rule(Box::new(default_rule()));
        assert_eq!(sim.state.grid().states(), 5);
        assert_eq!(sim.rule.name(), "445");
    }

    #[test]
    fn test_set_rule_with_same_palette_keeps_grid() {
        let sim = lone_cell_sim().set_rule(Box::new(|c: u8, n: u8| u8::from(c > 0 || n > 0)));
        assert_eq!(sim.state.grid().states(), 2);
        assert_eq!(sim.state.grid().population(), 1);
        assert!(sim.state.is_settled());
    }

    #[test]
    fn test_speed_is_clamped() {
        let sim = lone_cell_sim().adjust_speed(100.0);
        assert_eq!(sim.updates_per_second, 30.0);
        let sim = sim.adjust_speed(-100.0);
        assert_eq!(sim.updates_per_second, 0.5);
    }

    #[test]
    fn test_from_config() {
        let config = SimConfig {
            half_extents: [2, 2, 2],
            warmup_generations: 2,
            algorithm: Algorithm::Parallel,
            ..SimConfig::default()
        };
        let sim = Simulation::from_config(&config).unwrap();
        assert!(sim.is_running);
        assert_eq!(sim.generation, 2);
        assert_eq!(sim.algorithm, Algorithm::Parallel);
        assert_eq!(sim.dimensions().len(), 64);
        assert_eq!(sim.state.grid().states(), 5);
        assert!(sim.state.is_settled());
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = SimConfig {
            rule: "bad".to_owned(),
            ..SimConfig::default()
        };
        assert!(Simulation::from_config(&config).is_err());
    }
}
