use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use super::{CellGrid, DEFAULT_STATES, GridDimensions, Rule};

/// One generation transition: the grid being left, the grid being entered
/// and the core mask between them.
///
/// The core marks cells that were visible before and are still visible
/// after. Persisting faces are culled against it while they animate so the
/// set of faces stays fixed and only their shading changes.
///
/// Grids are shared, so the previous state's grid becomes this state's
/// `old_grid` without a copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState {
    grid: Arc<CellGrid>,
    old_grid: Arc<CellGrid>,
    core: Arc<CellGrid>,
}

impl GridState {
    /// Transitionless state: grid, old grid and core are all `grid`.
    pub fn make_from_grid(grid: CellGrid) -> Self {
        let grid = Arc::new(grid);
        Self {
            grid: Arc::clone(&grid),
            old_grid: Arc::clone(&grid),
            core: grid,
        }
    }

    /// Transition between two explicit grids. Returns `None` when their
    /// dimensions differ.
    pub fn make_transition(old_grid: CellGrid, grid: CellGrid) -> Option<Self> {
        if old_grid.dimensions() != grid.dimensions() {
            return None;
        }

        let core = grid
            .cells()
            .iter()
            .zip(old_grid.cells())
            .map(|(&next, &prev)| u8::from(next > 0 && prev > 0))
            .collect();

        Some(Self {
            core: Arc::new(CellGrid::from_cells_unchecked(grid.dimensions(), core, DEFAULT_STATES)),
            grid: Arc::new(grid),
            old_grid: Arc::new(old_grid),
        })
    }

    /// Advance one generation. Every cell is evaluated against `old.grid()`
    /// only.
    pub fn make_updated<R: Rule + ?Sized>(old: &GridState, rule: &R) -> Self {
        let grid = old.grid();
        let dims = grid.dimensions();

        let (cells, core): (Vec<u8>, Vec<u8>) = dims
            .coords()
            .zip(grid.cells())
            .map(|(pos, &current)| Self::evolve_cell(grid, rule, pos, current))
            .unzip();

        Self::from_cells(old, dims, cells, core)
    }

    /// [`make_updated`](Self::make_updated) spread over the rayon pool.
    /// Produces the same state.
    pub fn make_updated_parallel<R: Rule + ?Sized>(old: &GridState, rule: &R) -> Self {
        let grid = old.grid();
        let dims = grid.dimensions();

        let (cells, core): (Vec<u8>, Vec<u8>) = grid
            .cells()
            .par_iter()
            .enumerate()
            .map(|(idx, &current)| Self::evolve_cell(grid, rule, dims.coord_of(idx), current))
            .unzip();

        Self::from_cells(old, dims, cells, core)
    }

    /// Apply `n` updates back to back, keeping only the last state.
    pub fn skip_updates<R: Rule + ?Sized>(init: &GridState, rule: &R, n: usize) -> Self {
        let state = (0..n).fold(init.clone(), |state, _| Self::make_updated(&state, rule));
        debug!(generations = n, population = state.grid().population(), "skipped updates");
        state
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn old_grid(&self) -> &CellGrid {
        &self.old_grid
    }

    pub fn core(&self) -> &CellGrid {
        &self.core
    }

    /// True when the grid did not change across this transition
    pub fn is_settled(&self) -> bool {
        Arc::ptr_eq(&self.grid, &self.old_grid) || self.grid.cells() == self.old_grid.cells()
    }

    #[inline]
    fn evolve_cell<R: Rule + ?Sized>(
        grid: &CellGrid,
        rule: &R,
        pos: glam::IVec3,
        current: u8,
    ) -> (u8, u8) {
        let next = rule.evolve(current, grid.neighbour_pop(pos));
        let core = u8::from(next > 0 && grid.is_visible(pos));
        (next, core)
    }

    fn from_cells(old: &GridState, dims: GridDimensions, cells: Vec<u8>, core: Vec<u8>) -> Self {
        let states = old.grid.states();
        Self {
            grid: Arc::new(CellGrid::from_cells_unchecked(dims, cells, states)),
            old_grid: Arc::clone(&old.grid),
            core: Arc::new(CellGrid::from_cells_unchecked(dims, core, DEFAULT_STATES)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_rule;
    use glam::IVec3;
    use rand::{SeedableRng, rngs::StdRng};

    fn random_grid(seed: u64, states: u8) -> CellGrid {
        let mut rng = StdRng::seed_from_u64(seed);
        CellGrid::make_random_with(&mut rng, GridDimensions::new(3, 3, 3), 0.35, states)
    }

    #[test]
    fn test_initial_state_has_no_transition() {
        let state = GridState::make_from_grid(random_grid(1, 2));
        assert_eq!(state.grid(), state.old_grid());
        assert_eq!(state.grid(), state.core());
        assert!(state.is_settled());
    }

    #[test]
    fn test_update_applies_rule_to_old_grid() {
        let rule = default_rule();
        let old = GridState::make_from_grid(random_grid(2, 5));
        let new = GridState::make_updated(&old, &rule);

        assert_eq!(new.old_grid(), old.grid());
        for pos in old.grid().dimensions().coords() {
            let before = old.grid().get_cell(pos).unwrap();
            let expected = rule.evolve(before, old.grid().neighbour_pop(pos));
            assert_eq!(new.grid().get_cell(pos), Some(expected), "at {pos}");
        }
    }

    #[test]
    fn test_core_marks_cells_visible_on_both_sides() {
        let old = GridState::make_from_grid(random_grid(3, 2));
        let new = GridState::make_updated(&old, &|_: u8, n: u8| u8::from(n >= 3));

        assert_eq!(new.core().states(), 2);
        for pos in old.grid().dimensions().coords() {
            let expected = new.grid().get_cell(pos).unwrap() > 0 && old.grid().is_visible(pos);
            assert_eq!(new.core().get_cell(pos), Some(u8::from(expected)), "at {pos}");
        }
    }

    #[test]
    fn test_update_keeps_palette_size() {
        let old = GridState::make_from_grid(random_grid(4, 7));
        let new = GridState::make_updated(&old, &|c: u8, _: u8| c);
        assert_eq!(new.grid().states(), 7);
        assert!(new.is_settled());
    }

    #[test]
    fn test_parallel_update_matches_serial() {
        let rule = default_rule();
        let old = GridState::make_from_grid(random_grid(5, 5));
        assert_eq!(
            GridState::make_updated(&old, &rule),
            GridState::make_updated_parallel(&old, &rule)
        );
    }

    #[test]
    fn test_skip_updates_matches_repeated_updates() {
        let rule = default_rule();
        let init = GridState::make_from_grid(random_grid(6, 5));
        let stepped = (0..4).fold(init.clone(), |s, _| GridState::make_updated(&s, &rule));
        assert_eq!(GridState::skip_updates(&init, &rule, 4), stepped);
        assert_eq!(GridState::skip_updates(&init, &rule, 0), init);
    }

    #[test]
    fn test_explicit_transition() {
        let dims = GridDimensions::new(1, 1, 1);
        let old = CellGrid::make_empty(dims, 2).with_cell(IVec3::ZERO, 1).with_cell(IVec3::NEG_ONE, 1);
        let new = CellGrid::make_empty(dims, 2).with_cell(IVec3::ZERO, 1);
        let state = GridState::make_transition(old, new).unwrap();
        assert_eq!(state.core().get_cell(IVec3::ZERO), Some(1));
        assert_eq!(state.core().get_cell(IVec3::NEG_ONE), Some(0));
        assert!(!state.is_settled());

        let other = CellGrid::make_empty(GridDimensions::new(2, 1, 1), 2);
        assert!(GridState::make_transition(other, CellGrid::make_empty(dims, 2)).is_none());
    }

    #[test]
    fn test_lone_cell_survives_under_stay_rule() {
        let grid = CellGrid::make_empty(GridDimensions::new(1, 1, 1), 2).with_cell(IVec3::ZERO, 1);
        let old = GridState::make_from_grid(grid);
        let new = GridState::make_updated(&old, &|c: u8, _: u8| u8::from(c > 0));
        assert_eq!(new.grid().population(), 1);
        assert_eq!(new.core().get_cell(IVec3::ZERO), Some(1));
        assert_eq!(new.core().population(), 1);
    }
}
