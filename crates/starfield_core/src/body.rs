//! A recycled scene body (star or planet)

use glam::Vec3;

/// Depth at which a body re-enters the field after passing the camera
pub const FAR_DEPTH: f32 = -100.0;

/// Depth past which a body is considered behind the camera
pub const NEAR_THRESHOLD: f32 = 0.1;

/// Depth units travelled per second
pub const DEPTH_SPEED: f32 = 10.0;

/// Position and spin axis of a star or planet
///
/// Bodies live in fixed-size pools and are never created or destroyed
/// after startup; [`Body::advance`] moves them toward the camera and
/// reports when they need to be respawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// World-space position
    pub position: Vec3,
    /// Unit rotation axis
    pub axis: Vec3,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            axis: Vec3::Y,
        }
    }
}

impl Body {
    /// Create a body at the given position spinning around `axis`
    pub fn new(position: Vec3, axis: Vec3) -> Self {
        Self { position, axis }
    }

    /// Move toward the camera by `dt * DEPTH_SPEED`
    ///
    /// Returns `true` once the body has passed [`NEAR_THRESHOLD`].
    #[inline]
    pub fn advance(&mut self, dt: f32) -> bool {
        self.position.z += dt * DEPTH_SPEED;
        self.is_behind_camera()
    }

    /// Whether the body is behind the camera plane
    #[inline]
    pub fn is_behind_camera(&self) -> bool {
        self.position.z > NEAR_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_toward_camera() {
        let mut body = Body::new(Vec3::new(1.0, 2.0, -50.0), Vec3::Y);
        let passed = body.advance(0.5);
        assert!(!passed);
        assert_eq!(body.position, Vec3::new(1.0, 2.0, -45.0));
    }

    #[test]
    fn test_advance_reports_crossing() {
        let mut body = Body::new(Vec3::new(0.0, 0.0, 0.05), Vec3::Y);
        assert!(body.advance(0.01));
        assert!(body.is_behind_camera());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let body = Body::new(Vec3::new(0.0, 0.0, NEAR_THRESHOLD), Vec3::Y);
        assert!(!body.is_behind_camera());
    }
}
