//! Easing and blending shared by faces and their animations.

use glam::{Vec3, Vec4};

/// Cubic Hermite ease over [0, 1] with flat tangents at both ends.
/// Input outside the unit interval is clamped.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

/// Linear blend, exactly `a` at `t = 0` and exactly `b` at `t = 1`
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn mix_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Component-wise blend of four per-vertex AO values
#[inline]
pub fn mix_aos(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a * (1.0 - t) + b * t
}

/// Scale of an appearing face: a short oscillating pop that settles at 1.
pub fn pop_in(p: f32) -> f32 {
    mix(1.0 - (10.0 * p * p).cos(), 1.0, smoothstep(p))
}

/// Scale of a disappearing face: reaches 0 halfway through and stays there.
pub fn shrink_out(p: f32) -> f32 {
    1.0 - smoothstep(2.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_smoothstep_endpoints_and_clamp() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < EPS);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let samples: Vec<f32> = (0..=100).map(|i| smoothstep(i as f32 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_mix() {
        assert_eq!(mix(2.0, 4.0, 0.0), 2.0);
        assert_eq!(mix(2.0, 4.0, 1.0), 4.0);
        assert_eq!(mix(2.0, 4.0, 0.25), 2.5);
        assert_eq!(mix_vec3(Vec3::ZERO, Vec3::ONE, 0.5), Vec3::splat(0.5));
        assert_eq!(mix_aos(Vec4::ONE, Vec4::splat(0.5), 1.0), Vec4::splat(0.5));
    }

    #[test]
    fn test_pop_in_starts_collapsed_and_settles() {
        assert!(pop_in(0.0).abs() < EPS);
        assert!((pop_in(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_shrink_out_collapses_by_half_time() {
        assert_eq!(shrink_out(0.0), 1.0);
        assert_eq!(shrink_out(0.5), 0.0);
        assert_eq!(shrink_out(0.8), 0.0);
        assert!(shrink_out(0.25) > 0.0 && shrink_out(0.25) < 1.0);
    }
}
