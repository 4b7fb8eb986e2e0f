use glam::{IVec3, Vec3, Vec4};
use rayon::prelude::*;
use tracing::debug;

use super::interpolation::{mix_aos, mix_vec3, pop_in, shrink_out, smoothstep};
use super::{Face, GridState};

/// A face animating between two generations.
///
/// Every query takes the transition progress `p`, 0 when the new
/// generation has just started and 1 once it has settled. Callers clamp
/// `p` to that range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimFace {
    /// Cell became visible: pops in from its centre.
    Appearing { end: Face },
    /// Cell became invisible: shrinks away during the first half.
    Disappearing { start: Face },
    /// Geometry and shading both blend from `start` to `end`.
    Morphing { start: Face, end: Face },
    /// Geometry stays at `start`, only AO blends towards `end`.
    AoTransition { start: Face, end: Face },
}

impl AnimFace {
    /// Animated faces for one cell, chosen by whether it was visible before
    /// and after the transition.
    pub fn build_for_cell(state: &GridState, pos: IVec3) -> Vec<AnimFace> {
        let (old, new) = (state.old_grid(), state.grid());

        match (old.is_visible(pos), new.is_visible(pos)) {
            (false, false) => Vec::new(),
            (false, true) => Face::all_facets_for_cell(pos, new)
                .map(|end| AnimFace::Appearing { end })
                .to_vec(),
            (true, false) => Face::all_facets_for_cell(pos, old)
                .map(|start| AnimFace::Disappearing { start })
                .to_vec(),
            (true, true) => {
                let starts = Face::from_visible_cell(state.core(), pos, old);
                let ends = Face::from_visible_cell(state.core(), pos, new);
                starts
                    .into_iter()
                    .filter_map(|start| {
                        ends.iter()
                            .find(|end| end.orientation() == start.orientation())
                            .map(|&end| AnimFace::AoTransition { start, end })
                    })
                    .collect()
            }
        }
    }

    /// Animated faces for the whole grid, rebuilt from scratch.
    pub fn build_all(state: &GridState) -> Vec<AnimFace> {
        let faces: Vec<AnimFace> = state
            .grid()
            .dimensions()
            .coords()
            .flat_map(|pos| Self::build_for_cell(state, pos))
            .collect();
        debug!(faces = faces.len(), "built animated faces");
        faces
    }

    /// [`build_all`](Self::build_all) spread over the rayon pool, same order.
    pub fn build_all_parallel(state: &GridState) -> Vec<AnimFace> {
        let dims = state.grid().dimensions();
        let faces: Vec<AnimFace> = (0..dims.len())
            .into_par_iter()
            .flat_map_iter(|idx| Self::build_for_cell(state, dims.coord_of(idx)))
            .collect();
        debug!(faces = faces.len(), "built animated faces in parallel");
        faces
    }

    pub const fn start(&self) -> Option<&Face> {
        match self {
            AnimFace::Appearing { .. } => None,
            AnimFace::Disappearing { start }
            | AnimFace::Morphing { start, .. }
            | AnimFace::AoTransition { start, .. } => Some(start),
        }
    }

    pub const fn end(&self) -> Option<&Face> {
        match self {
            AnimFace::Disappearing { .. } => None,
            AnimFace::Appearing { end }
            | AnimFace::Morphing { end, .. }
            | AnimFace::AoTransition { end, .. } => Some(end),
        }
    }

    pub fn vertices(&self, p: f32) -> [Vec3; 4] {
        match self {
            AnimFace::Appearing { end } => end.vertices(pop_in(p)),
            AnimFace::Disappearing { start } => start.vertices(shrink_out(p)),
            AnimFace::Morphing { start, end } => {
                let t = smoothstep(p);
                let (from, to) = (start.vertices(1.0), end.vertices(1.0));
                std::array::from_fn(|i| mix_vec3(from[i], to[i], t))
            }
            AnimFace::AoTransition { start, .. } => start.vertices(1.0),
        }
    }

    /// Face normal. While morphing this is a plain blend of the two normals,
    /// not a rotation, so it is not unit length mid-transition.
    pub fn normal(&self, p: f32) -> Vec3 {
        match self {
            AnimFace::Appearing { end } => end.normal(),
            AnimFace::Disappearing { start } | AnimFace::AoTransition { start, .. } => start.normal(),
            AnimFace::Morphing { start, end } => mix_vec3(start.normal(), end.normal(), smoothstep(p)),
        }
    }

    /// Triangle indices, the same at every progress value.
    pub fn indices(&self, offset: u32) -> [u32; 6] {
        match self {
            AnimFace::Appearing { end } => end.indices(offset),
            AnimFace::Disappearing { start }
            | AnimFace::Morphing { start, .. }
            | AnimFace::AoTransition { start, .. } => start.indices(offset),
        }
    }

    pub fn aos(&self, p: f32) -> Vec4 {
        let t = smoothstep(p);
        match self {
            AnimFace::Appearing { end } => mix_aos(Vec4::ONE, end.aos(), t),
            AnimFace::Disappearing { start } => mix_aos(start.aos(), Vec4::ONE, t),
            AnimFace::Morphing { start, end } | AnimFace::AoTransition { start, end } => {
                mix_aos(start.aos(), end.aos(), t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellGrid, GridDimensions, Orientation};
    use rand::{SeedableRng, rngs::StdRng};

    fn lone_cell(state: u8) -> CellGrid {
        CellGrid::make_empty(GridDimensions::new(2, 2, 2), 2).with_cell(IVec3::ZERO, state)
    }

    fn transition(old: CellGrid, new: CellGrid) -> GridState {
        GridState::make_transition(old, new).unwrap()
    }

    #[test]
    fn test_hidden_cell_has_no_faces() {
        let state = transition(lone_cell(0), lone_cell(0));
        assert!(AnimFace::build_for_cell(&state, IVec3::ZERO).is_empty());
    }

    #[test]
    fn test_appearing_cell() {
        let state = transition(lone_cell(0), lone_cell(1));
        let faces = AnimFace::build_for_cell(&state, IVec3::ZERO);
        assert_eq!(faces.len(), 3);
        assert!(faces.iter().all(|f| matches!(f, AnimFace::Appearing { .. })));
        assert!(faces.iter().all(|f| f.start().is_none()));
    }

    #[test]
    fn test_disappearing_cell() {
        let state = transition(lone_cell(1), lone_cell(0));
        let faces = AnimFace::build_for_cell(&state, IVec3::ZERO);
        assert_eq!(faces.len(), 3);
        assert!(faces.iter().all(|f| matches!(f, AnimFace::Disappearing { .. })));
        assert!(faces.iter().all(|f| f.end().is_none()));
    }

    #[test]
    fn test_appearing_cell_ignores_neighbour_culling() {
        let old = lone_cell(0).with_cell(IVec3::NEG_X, 1);
        let new = lone_cell(1).with_cell(IVec3::NEG_X, 1);
        let faces = AnimFace::build_for_cell(&transition(old, new), IVec3::ZERO);
        assert_eq!(faces.len(), 3);
        assert_eq!(faces[0].end().map(Face::orientation), Some(Orientation::NegX));
    }

    #[test]
    fn test_persisting_cell_culls_against_core() {
        // The -X neighbour persists, the +Y neighbour is born.
        let old = lone_cell(1).with_cell(IVec3::NEG_X, 1);
        let new = lone_cell(1).with_cell(IVec3::NEG_X, 1).with_cell(IVec3::Y, 1);
        let state = transition(old, new);
        let faces = AnimFace::build_for_cell(&state, IVec3::ZERO);

        let orientations: Vec<_> = faces.iter().filter_map(|f| f.start().map(Face::orientation)).collect();
        assert_eq!(orientations, vec![Orientation::PosY, Orientation::NegZ]);
        assert!(faces.iter().all(|f| matches!(f, AnimFace::AoTransition { .. })));
    }

    #[test]
    fn test_persisting_cell_blends_ao() {
        // A cell appears diagonally above the -X face, darkening two corners.
        let old = lone_cell(1);
        let new = lone_cell(1).with_cell(IVec3::new(-1, 1, 0), 1);
        let faces = AnimFace::build_for_cell(&transition(old, new), IVec3::ZERO);
        let face = faces[0];
        assert_eq!(face.start().map(Face::orientation), Some(Orientation::NegX));
        assert_eq!(face.aos(0.0), Vec4::ONE);
        assert_eq!(face.aos(1.0), face.end().map(Face::aos).unwrap());
        assert_ne!(face.aos(1.0), Vec4::ONE);
        assert_eq!(face.vertices(0.3), face.start().unwrap().vertices(1.0));
    }

    #[test]
    fn test_appearing_geometry() {
        let end = Face::new(IVec3::new(1, 0, -1), Orientation::PosY, Vec4::splat(0.5));
        let face = AnimFace::Appearing { end };

        assert!(face.vertices(0.0).iter().all(|&v| (v - end.center()).length() < 1e-6));
        assert_eq!(face.vertices(1.0), end.vertices(1.0));
        assert_eq!(face.normal(0.5), end.normal());
        assert_eq!(face.aos(0.0), Vec4::ONE);
        assert_eq!(face.aos(1.0), Vec4::splat(0.5));
    }

    #[test]
    fn test_disappearing_geometry() {
        let start = Face::new(IVec3::ZERO, Orientation::NegZ, Vec4::splat(0.25));
        let face = AnimFace::Disappearing { start };

        assert_eq!(face.vertices(0.0), start.vertices(1.0));
        assert!(face.vertices(0.5).iter().all(|&v| v == start.center()));
        assert!(face.vertices(0.9).iter().all(|&v| v == start.center()));
        assert_eq!(face.aos(0.0), Vec4::splat(0.25));
        assert_eq!(face.aos(1.0), Vec4::ONE);
    }

    #[test]
    fn test_morphing_blends_geometry_and_normal() {
        let start = Face::new(IVec3::ZERO, Orientation::NegX, Vec4::ONE);
        let end = Face::new(IVec3::ZERO, Orientation::PosY, Vec4::splat(0.5));
        let face = AnimFace::Morphing { start, end };

        assert_eq!(face.vertices(0.0), start.vertices(1.0));
        assert_eq!(face.vertices(1.0), end.vertices(1.0));
        assert_eq!(face.normal(0.0), start.normal());
        assert_eq!(face.normal(1.0), end.normal());
        assert_eq!(face.normal(0.5), Vec3::new(-0.5, 0.5, 0.0));
        assert_eq!(face.aos(0.5), Vec4::splat(0.75));
    }

    #[test]
    fn test_indices_are_time_invariant() {
        let start = Face::new(IVec3::ZERO, Orientation::NegX, Vec4::new(1.0, 0.25, 1.0, 0.25));
        let end = Face::new(IVec3::ZERO, Orientation::NegX, Vec4::ONE);

        assert_eq!(AnimFace::Appearing { end }.indices(8), end.indices(8));
        assert_eq!(AnimFace::Disappearing { start }.indices(8), start.indices(8));
        assert_eq!(AnimFace::AoTransition { start, end }.indices(8), start.indices(8));
        assert_eq!(AnimFace::Morphing { start, end }.indices(8), start.indices(8));
    }

    #[test]
    fn test_unit_grid_birth_appears_everywhere() {
        let dims = GridDimensions::new(1, 1, 1);
        let old = CellGrid::make_empty(dims, 2);
        let new = old.with_cell(IVec3::ZERO, 1);
        let faces = AnimFace::build_all(&transition(old, new));
        assert_eq!(faces.len(), 3);
        assert!(faces.iter().all(|f| matches!(f, AnimFace::Appearing { .. })));
    }

    #[test]
    fn test_unit_grid_survivor_only_blends_ao() {
        let grid = CellGrid::make_empty(GridDimensions::new(1, 1, 1), 2).with_cell(IVec3::ZERO, 1);
        let state = GridState::make_updated(&GridState::make_from_grid(grid), &|c: u8, _: u8| u8::from(c > 0));
        let faces = AnimFace::build_all(&state);
        assert_eq!(faces.len(), 3);
        assert!(faces.iter().all(|f| matches!(f, AnimFace::AoTransition { .. })));
        assert!(faces.iter().all(|f| f.aos(0.0) == Vec4::ONE && f.aos(1.0) == Vec4::ONE));
    }

    #[test]
    fn test_parallel_build_matches_serial() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = CellGrid::make_random_with(&mut rng, GridDimensions::new(3, 3, 3), 0.4, 2);
        let old = GridState::make_from_grid(grid);
        let state = GridState::make_updated(&old, &|c: u8, n: u8| u8::from(n >= 4 || (c > 0 && n >= 2)));
        assert_eq!(AnimFace::build_all(&state), AnimFace::build_all_parallel(&state));
    }
}
