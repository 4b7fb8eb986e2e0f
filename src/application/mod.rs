mod camera;
mod config;
mod simulation;

pub use camera::Camera;
pub use config::SimConfig;
pub use simulation::Simulation;
