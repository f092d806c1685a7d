//! Camera view and projection settings
//!
//! The projection is re-derived from [`ProjectionSettings`] and the viewport
//! aspect every frame. Matrices follow the wgpu clip-space convention
//! (depth in `[0, 1]`).

use std::fmt;
use std::ops::RangeInclusive;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Allowed field of view, in degrees
pub const FOV_RANGE: RangeInclusive<f32> = 5.0..=179.0;

/// Default field of view, in degrees
pub const DEFAULT_FOV: f32 = 130.0;

/// Near clipping plane
pub const NEAR_PLANE: f32 = 0.01;

/// Far clipping plane
pub const FAR_PLANE: f32 = 100.0;

/// Half height of the orthographic view volume
pub const ORTHO_HALF_HEIGHT: f32 = 20.0;

/// Projection kind selectable from the UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    /// Both modes, in combo box order
    pub const ALL: [ProjectionMode; 2] = [ProjectionMode::Perspective, ProjectionMode::Orthographic];

    /// Label shown in the UI
    pub fn label(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "Perspective",
            ProjectionMode::Orthographic => "Orthographic",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-editable projection state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionSettings {
    /// Selected projection
    pub mode: ProjectionMode,
    /// Vertical field of view in degrees (perspective only)
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Half height of the orthographic volume
    pub ortho_half_height: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fov_degrees: DEFAULT_FOV,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ortho_half_height: ORTHO_HALF_HEIGHT,
        }
    }
}

impl ProjectionSettings {
    /// Set the field of view, clamped to [`FOV_RANGE`]
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov_degrees = clamp_fov(degrees);
    }

    /// Projection matrix for the given viewport aspect ratio
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => Mat4::perspective_rh(
                clamp_fov(self.fov_degrees).to_radians(),
                aspect,
                self.near,
                self.far,
            ),
            ProjectionMode::Orthographic => {
                let half_width = self.ortho_half_height * aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -self.ortho_half_height,
                    self.ortho_half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }
}

/// Clamp a field of view to [`FOV_RANGE`]
pub fn clamp_fov(degrees: f32) -> f32 {
    degrees.clamp(*FOV_RANGE.start(), *FOV_RANGE.end())
}

/// Width over height, treating a collapsed viewport as square
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Fixed camera at the origin looking down -Z
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_view_matrix_is_identity() {
        // Looking down -Z from the origin with +Y up needs no transform
        assert!(view_matrix().abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }

    #[test]
    fn test_perspective_depth_range() {
        let settings = ProjectionSettings::default();
        let proj = settings.matrix(16.0 / 9.0);

        let near = proj * Vec4::new(0.0, 0.0, -NEAR_PLANE, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -FAR_PLANE, 1.0);
        assert!((near.z / near.w).abs() < EPSILON);
        assert!((far.z / far.w - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_perspective_uses_fov() {
        let mut settings = ProjectionSettings::default();
        settings.set_fov(90.0);
        let proj = settings.matrix(1.0);
        // cot(45 degrees) = 1
        assert!((proj.y_axis.y - 1.0).abs() < EPSILON);
        assert!((proj.x_axis.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_orthographic_extent() {
        let settings = ProjectionSettings {
            mode: ProjectionMode::Orthographic,
            ..Default::default()
        };
        let proj = settings.matrix(2.0);
        let corner = proj * Vec4::new(40.0, 20.0, -50.0, 1.0);
        assert!((corner.x - 1.0).abs() < EPSILON);
        assert!((corner.y - 1.0).abs() < EPSILON);
        assert_eq!(corner.w, 1.0);
    }

    #[test]
    fn test_fov_clamped() {
        let mut settings = ProjectionSettings::default();
        settings.set_fov(1.0);
        assert_eq!(settings.fov_degrees, 5.0);
        settings.set_fov(200.0);
        assert_eq!(settings.fov_degrees, 179.0);
        settings.set_fov(60.0);
        assert_eq!(settings.fov_degrees, 60.0);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1280, 720), 1280.0 / 720.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
    }

    #[test]
    fn test_mode_toggle_and_labels() {
        assert_eq!(ProjectionMode::Perspective.toggled(), ProjectionMode::Orthographic);
        assert_eq!(ProjectionMode::Orthographic.toggled(), ProjectionMode::Perspective);
        assert_eq!(ProjectionMode::Perspective.to_string(), "Perspective");
        assert_eq!(ProjectionMode::Orthographic.label(), "Orthographic");
    }
}
