//! Respawn policies for stars and planets
//!
//! A body that passes the camera is resampled in place. Stars scatter
//! uniformly over a box; planets are pushed out of the center into
//! quadrant-dependent bands so they frame the view instead of hitting it.

use std::ops::Range;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::body::Body;

/// Depth range for freshly sampled bodies
pub const DEPTH_RANGE: Range<f32> = -100.0..0.0;

/// Star X/Y range
pub const STAR_XY_RANGE: Range<f32> = -20.0..20.0;

/// Range of each star axis component before normalization
pub const STAR_AXIS_RANGE: Range<f32> = -1.0..1.0;

/// Planet baseline X/Y range, before the band offset
pub const PLANET_XY_RANGE: Range<f32> = -10.0..10.0;

/// Range of the planet axis X/Y components before normalization
pub const PLANET_AXIS_RANGE: Range<f32> = -0.0005..0.0005;

/// Offset applied when a planet is pushed into its band
const BAND_OFFSET: f32 = 10.0;

/// Samples at or beyond this magnitude on both axes go to the corner band
const CORNER_THRESHOLD: f32 = 5.0;

/// Policy that resamples a body's position and axis
pub trait RespawnPolicy {
    /// Resample `body` in place
    fn respawn<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R);
}

/// Uniform box sampling used for stars
#[derive(Clone, Copy, Debug, Default)]
pub struct StarRespawn;

impl RespawnPolicy for StarRespawn {
    fn respawn<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R) {
        body.position = Vec3::new(
            rng.random_range(STAR_XY_RANGE),
            rng.random_range(STAR_XY_RANGE),
            rng.random_range(DEPTH_RANGE),
        );

        let axis = Vec3::new(
            rng.random_range(STAR_AXIS_RANGE),
            rng.random_range(STAR_AXIS_RANGE),
            rng.random_range(STAR_AXIS_RANGE),
        );
        body.axis = unit_axis(axis);
    }
}

/// Quadrant band sampling used for planets
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanetRespawn;

impl RespawnPolicy for PlanetRespawn {
    fn respawn<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R) {
        let x = rng.random_range(PLANET_XY_RANGE);
        let y = rng.random_range(PLANET_XY_RANGE);

        // Samples on a diagonal or the Y axis match no band and keep their old position
        if let Some(placed) = place_planet(x, y) {
            body.position = placed.extend(rng.random_range(DEPTH_RANGE));
        }

        let axis = Vec3::new(
            rng.random_range(PLANET_AXIS_RANGE),
            rng.random_range(PLANET_AXIS_RANGE),
            0.0,
        );
        body.axis = unit_axis(axis);
    }
}

/// Map a baseline planet sample to its band position
///
/// Each quadrant sends large samples to its corner, and otherwise pushes
/// the sample outward along its dominant axis. The lower-left quadrant
/// does not push Y-dominant samples, which leaves a gap in that band.
pub fn place_planet(x: f32, y: f32) -> Option<Vec2> {
    let ax = x.abs();
    let ay = y.abs();

    if y <= 0.0 && x < 0.0 {
        if ax >= CORNER_THRESHOLD && ay >= CORNER_THRESHOLD {
            Some(Vec2::new(x - BAND_OFFSET, y - BAND_OFFSET))
        } else if ax > ay {
            Some(Vec2::new(x - BAND_OFFSET, y))
        } else if ax < ay {
            Some(Vec2::new(x, y))
        } else {
            None
        }
    } else if y <= 0.0 && x > 0.0 {
        if x >= CORNER_THRESHOLD && ay >= CORNER_THRESHOLD {
            Some(Vec2::new(x + BAND_OFFSET, y - BAND_OFFSET))
        } else if x > ay {
            Some(Vec2::new(x + BAND_OFFSET, y))
        } else if x < ay {
            Some(Vec2::new(x, y - BAND_OFFSET))
        } else {
            None
        }
    } else if y > 0.0 && x < 0.0 {
        if ax >= CORNER_THRESHOLD && y >= CORNER_THRESHOLD {
            Some(Vec2::new(x - BAND_OFFSET, y + BAND_OFFSET))
        } else if ax > y {
            Some(Vec2::new(x - BAND_OFFSET, y))
        } else if ax < y {
            Some(Vec2::new(x, y + BAND_OFFSET))
        } else {
            None
        }
    } else if y > 0.0 && x > 0.0 {
        if x >= CORNER_THRESHOLD && y >= CORNER_THRESHOLD {
            Some(Vec2::new(x + BAND_OFFSET, y + BAND_OFFSET))
        } else if x > y {
            Some(Vec2::new(x + BAND_OFFSET, y))
        } else if x < y {
            Some(Vec2::new(x, y + BAND_OFFSET))
        } else {
            None
        }
    } else {
        None
    }
}

/// Normalize a sampled axis, falling back to +Y for a zero sample
fn unit_axis(axis: Vec3) -> Vec3 {
    axis.try_normalize().unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_star_respawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut body = Body::default();
        for _ in 0..1000 {
            StarRespawn.respawn(&mut body, &mut rng);
            assert!((-20.0..=20.0).contains(&body.position.x));
            assert!((-20.0..=20.0).contains(&body.position.y));
            assert!((-100.0..=0.0).contains(&body.position.z));
            assert!((body.axis.length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_planet_respawn_axis_in_xy_plane() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut body = Body::default();
        for _ in 0..1000 {
            PlanetRespawn.respawn(&mut body, &mut rng);
            assert_eq!(body.axis.z, 0.0);
            assert!((body.axis.length() - 1.0).abs() < EPSILON);
            assert!((-100.0..=0.0).contains(&body.position.z));
        }
    }

    #[test]
    fn test_planet_respawn_stays_in_bands() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut body = Body::default();
        for _ in 0..1000 {
            PlanetRespawn.respawn(&mut body, &mut rng);
            // Baseline in [-10, 10] plus at most one band offset per axis
            assert!(body.position.x.abs() <= 20.0);
            assert!(body.position.y.abs() <= 20.0);
        }
    }

    #[test]
    fn test_corner_bands() {
        assert_eq!(place_planet(-6.0, -7.0), Some(Vec2::new(-16.0, -17.0)));
        assert_eq!(place_planet(6.0, -7.0), Some(Vec2::new(16.0, -17.0)));
        assert_eq!(place_planet(-6.0, 7.0), Some(Vec2::new(-16.0, 17.0)));
        assert_eq!(place_planet(6.0, 7.0), Some(Vec2::new(16.0, 17.0)));
    }

    #[test]
    fn test_x_dominant_bands() {
        assert_eq!(place_planet(-4.0, -1.0), Some(Vec2::new(-14.0, -1.0)));
        assert_eq!(place_planet(4.0, -1.0), Some(Vec2::new(14.0, -1.0)));
        assert_eq!(place_planet(-4.0, 1.0), Some(Vec2::new(-14.0, 1.0)));
        assert_eq!(place_planet(4.0, 1.0), Some(Vec2::new(14.0, 1.0)));
    }

    #[test]
    fn test_y_dominant_bands() {
        // Lower-left quadrant keeps its Y
        assert_eq!(place_planet(-1.0, -4.0), Some(Vec2::new(-1.0, -4.0)));
        assert_eq!(place_planet(1.0, -4.0), Some(Vec2::new(1.0, -14.0)));
        assert_eq!(place_planet(-1.0, 4.0), Some(Vec2::new(-1.0, 14.0)));
        assert_eq!(place_planet(1.0, 4.0), Some(Vec2::new(1.0, 14.0)));
    }

    #[test]
    fn test_unplaced_samples() {
        assert_eq!(place_planet(0.0, 3.0), None);
        assert_eq!(place_planet(0.0, -3.0), None);
        assert_eq!(place_planet(2.0, 2.0), None);
        assert_eq!(place_planet(-2.0, -2.0), None);
    }

    #[test]
    fn test_unit_axis_fallback() {
        assert_eq!(unit_axis(Vec3::ZERO), Vec3::Y);
        assert!((unit_axis(Vec3::new(3.0, 4.0, 0.0)) - Vec3::new(0.6, 0.8, 0.0)).length() < EPSILON);
    }
}
