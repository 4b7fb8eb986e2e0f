use glam::IVec3;
use rand::Rng;

use super::GridDimensions;

/// Palette size of a plain dead/live automaton
pub const DEFAULT_STATES: u8 = 2;

/// Probability used when seeding a random grid without an explicit one
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.5;

/// Immutable snapshot of one generation.
///
/// Cells are stored contiguously and addressed through
/// [`GridDimensions::index_of`]. A cell is *visible* when its state is
/// nonzero and *live* when it sits at the top of the palette (`states - 1`);
/// with more than two states the values in between are visible but decaying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    dimensions: GridDimensions,
    cells: Vec<u8>,
    states: u8,
}

impl CellGrid {
    /// Grid with every cell dead
    pub fn make_empty(dimensions: GridDimensions, states: u8) -> Self {
        Self {
            dimensions,
            cells: vec![0; dimensions.len()],
            states,
        }
    }

    /// Grid with every cell live
    pub fn make_full(dimensions: GridDimensions, states: u8) -> Self {
        Self {
            dimensions,
            cells: vec![states.saturating_sub(1); dimensions.len()],
            states,
        }
    }

    /// Each cell is independently live with probability `prob`, otherwise dead.
    pub fn make_random(dimensions: GridDimensions, prob: f64, states: u8) -> Self {
        Self::make_random_with(&mut rand::rng(), dimensions, prob, states)
    }

    /// [`make_random`](Self::make_random) driven by a caller-supplied RNG
    pub fn make_random_with<R: Rng + ?Sized>(
        rng: &mut R,
        dimensions: GridDimensions,
        prob: f64,
        states: u8,
    ) -> Self {
        let prob = if prob.is_nan() { 0.0 } else { prob.clamp(0.0, 1.0) };
        let live = states.saturating_sub(1);
        let cells = (0..dimensions.len())
            .map(|_| if rng.random_bool(prob) { live } else { 0 })
            .collect();

        Self {
            dimensions,
            cells,
            states,
        }
    }

    /// Wraps an explicit cell array. Returns `None` unless the array holds
    /// exactly `8 · X · Y · Z` cells.
    pub fn make_from_cells(dimensions: GridDimensions, cells: Vec<u8>, states: u8) -> Option<Self> {
        (cells.len() == dimensions.len()).then_some(Self {
            dimensions,
            cells,
            states,
        })
    }

    /// Caller guarantees `cells.len() == dimensions.len()`.
    pub(crate) fn from_cells_unchecked(dimensions: GridDimensions, cells: Vec<u8>, states: u8) -> Self {
        debug_assert_eq!(cells.len(), dimensions.len());
        Self {
            dimensions,
            cells,
            states,
        }
    }

    /// Copy of this grid with one cell replaced. Out-of-bounds positions
    /// return an unchanged copy.
    pub fn with_cell(&self, pos: IVec3, state: u8) -> Self {
        let mut next = self.clone();
        if let Some(idx) = self.dimensions.checked_index(pos) {
            next.cells[idx] = state;
        }
        next
    }

    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub const fn states(&self) -> u8 {
        self.states
    }

    /// State value of a live cell
    pub const fn live_state(&self) -> u8 {
        self.states.saturating_sub(1)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Cell state, or `None` outside the grid
    #[inline]
    pub fn get_cell(&self, pos: IVec3) -> Option<u8> {
        self.dimensions
            .checked_index(pos)
            .map(|idx| self.cells[idx])
    }

    #[inline]
    pub fn is_visible(&self, pos: IVec3) -> bool {
        self.get_cell(pos).is_some_and(|cell| cell > 0)
    }

    #[inline]
    pub fn is_live(&self, pos: IVec3) -> bool {
        self.get_cell(pos).is_some_and(|cell| cell == self.live_state())
    }

    /// Count live cells in the 26-cell cube around `pos`. The centre is
    /// never counted and neighbours outside the grid count as dead.
    pub fn neighbour_pop(&self, pos: IVec3) -> u8 {
        (-1..=1)
            .flat_map(|dx| (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| IVec3::new(dx, dy, dz))))
            .filter(|&offset| offset != IVec3::ZERO)
            .filter(|&offset| self.is_live(pos + offset))
            .count() as u8
    }

    /// Number of visible cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell > 0).count()
    }
}
