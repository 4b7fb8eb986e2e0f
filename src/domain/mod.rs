mod dimensions;
mod cell_grid;
mod grid_state;
mod rules;
mod face;
mod anim_face;
mod mesh;
mod algorithm;
pub mod interpolation;

pub use dimensions::{GridDimensions, MAX_CELLS, MAX_HALF_EXTENT};
pub use cell_grid::{CellGrid, DEFAULT_STATES, DEFAULT_LIVE_PROBABILITY};
pub use grid_state::GridState;
pub use rules::{Rule, LifeLikeRule, NeighbourSet, MAX_NEIGHBOURS, all_rules, default_rule};
pub use face::{Face, Orientation, AO_LEVELS, aos_from_ring, vertex_ao};
pub use anim_face::AnimFace;
pub use mesh::MeshBuffers;
pub use algorithm::Algorithm;
