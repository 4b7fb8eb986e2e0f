use std::f32::consts::PI;

use glam::Vec3;

// Only the -X, +Y and -Z faces are meshed, so the eye has to stay beyond the
// grid on all three of those sides. With these angles every axis component of
// the eye is at least a quarter of the distance, and the distance never drops
// below four extents.
const YAW_DEFAULT: f32 = -0.75 * PI;
const YAW_MIN: f32 = YAW_DEFAULT - 0.35;
const YAW_MAX: f32 = YAW_DEFAULT + 0.35;
const PITCH_MIN: f32 = 0.35;
const PITCH_MAX: f32 = 0.9;

/// Camera orbits the grid centre at a fixed distance
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Camera {
    /// Camera framing a grid with the given largest half-extent
    pub fn new(extent: f32) -> Self {
        let extent = extent.max(1.0);
        Self {
            yaw: YAW_DEFAULT,
            pitch: 0.6,
            distance: extent * 5.0,
            min_distance: extent * 4.0,
            max_distance: extent * 12.0,
        }
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.distance = (self.distance / factor).clamp(self.min_distance, self.max_distance);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Rotate around the target by screen-space drag
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw - dx * 0.005).clamp(YAW_MIN, YAW_MAX);
        self.pitch = (self.pitch + dy * 0.005).clamp(PITCH_MIN, PITCH_MAX);
    }

    /// Eye position relative to the grid centre
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Reset camera to default
    pub fn reset(&mut self) {
        *self = Self::new(self.min_distance / 4.0);
    }
}
