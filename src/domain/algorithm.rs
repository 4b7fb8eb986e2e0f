//! Algorithm enum for selecting how a generation is computed.
//!
//! Both strategies produce identical grids and face lists; they differ
//! only in whether the rayon pool is used.

use serde::{Deserialize, Serialize};

use super::{AnimFace, GridState, Rule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// One cell after another on the calling thread
    #[default]
    Serial,
    /// Cells split across the rayon pool
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Single thread, lowest overhead on small grids",
            Algorithm::Parallel => "Rayon pool for update and meshing",
        }
    }

    /// The other strategy
    pub fn toggled(self) -> Self {
        match self {
            Algorithm::Serial => Algorithm::Parallel,
            Algorithm::Parallel => Algorithm::Serial,
        }
    }

    pub fn update<R: Rule + ?Sized>(self, state: &GridState, rule: &R) -> GridState {
        match self {
            Algorithm::Serial => GridState::make_updated(state, rule),
            Algorithm::Parallel => GridState::make_updated_parallel(state, rule),
        }
    }

    pub fn build_faces(self, state: &GridState) -> Vec<AnimFace> {
        match self {
            Algorithm::Serial => AnimFace::build_all(state),
            Algorithm::Parallel => AnimFace::build_all_parallel(state),
        }
    }
}
