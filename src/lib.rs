// Domain layer - Core automaton, faces and animation
pub mod domain;

// Application layer - Simulation loop, config and camera
pub mod application;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

pub mod error;

// Re-exports for convenience
pub use domain::{Algorithm, AnimFace, CellGrid, Face, GridDimensions, GridState, LifeLikeRule, MeshBuffers, Rule};
pub use application::{Camera, SimConfig, Simulation};
pub use error::{ConfigError, RuleParseError};
