//! The starfield: fixed pools of stars and planets plus the shared spin angle

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::{Body, FAR_DEPTH};
use crate::instance::{
    model_matrix, planet_group, Instance, MeshKind, PLANET_SCALE, SHIP_AXIS, SHIP_COLOR,
    SHIP_SCALE, STAR_COLOR, STAR_SCALE,
};
use crate::spawn::{PlanetRespawn, RespawnPolicy, StarRespawn};

/// Number of stars in the pool
pub const STAR_COUNT: usize = 500;

/// Number of planets in the pool
pub const PLANET_COUNT: usize = 30;

/// Spin rate shared by every object, in degrees per second
pub const SPIN_DEGREES_PER_SECOND: f32 = 90.0;

/// Advance the shared spin angle and wrap it into `[0, 2π)`
#[inline]
pub fn advance_angle(angle: f32, dt: f32) -> f32 {
    (angle + SPIN_DEGREES_PER_SECOND.to_radians() * dt).rem_euclid(TAU)
}

/// Scene state advanced once per frame
///
/// Owns the random engine so that a seeded field replays identically.
pub struct Starfield {
    stars: Box<[Body; STAR_COUNT]>,
    planets: [Body; PLANET_COUNT],
    angle: f32,
    rng: StdRng,
}

impl Starfield {
    /// Create a field seeded from the operating system
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a deterministic field
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let mut stars = Box::new([Body::default(); STAR_COUNT]);
        for star in stars.iter_mut() {
            StarRespawn.respawn(star, &mut rng);
        }

        let mut planets = [Body::default(); PLANET_COUNT];
        for planet in planets.iter_mut() {
            PlanetRespawn.respawn(planet, &mut rng);
        }

        log::debug!(
            "Seeded starfield with {} stars and {} planets",
            STAR_COUNT,
            PLANET_COUNT
        );

        Self {
            stars,
            planets,
            angle: 0.0,
            rng,
        }
    }

    /// Advance the field by `dt` seconds
    ///
    /// Bodies that pass the camera are resampled and moved back to
    /// [`FAR_DEPTH`] in the same call.
    pub fn update(&mut self, dt: f32) {
        self.angle = advance_angle(self.angle, dt);

        for star in self.stars.iter_mut() {
            if star.advance(dt) {
                StarRespawn.respawn(star, &mut self.rng);
                star.position.z = FAR_DEPTH;
            }
        }

        for planet in self.planets.iter_mut() {
            if planet.advance(dt) {
                PlanetRespawn.respawn(planet, &mut self.rng);
                planet.position.z = FAR_DEPTH;
            }
        }
    }

    /// Current spin angle in radians
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Star pool
    #[inline]
    pub fn stars(&self) -> &[Body] {
        &self.stars[..]
    }

    /// Planet pool
    #[inline]
    pub fn planets(&self) -> &[Body] {
        &self.planets
    }

    /// Collect the draws for this frame: stars, then the ship, then planets
    pub fn instances(&self) -> Vec<Instance> {
        let mut instances = Vec::with_capacity(STAR_COUNT + 1 + PLANET_COUNT);
        self.collect_instances(&mut instances);
        instances
    }

    /// Like [`Starfield::instances`] but reuses `out`
    pub fn collect_instances(&self, out: &mut Vec<Instance>) {
        out.clear();

        out.extend(self.stars.iter().map(|star| Instance {
            mesh: MeshKind::Asteroid,
            model: model_matrix(star.position, STAR_SCALE, self.angle, star.axis),
            color: STAR_COLOR,
        }));

        out.push(Instance {
            mesh: MeshKind::Ship,
            model: model_matrix(Vec3::ZERO, SHIP_SCALE, self.angle, SHIP_AXIS),
            color: SHIP_COLOR,
        });

        out.extend(
            self.planets
                .iter()
                .enumerate()
                .filter_map(|(index, planet)| {
                    planet_group(index).map(|group| Instance {
                        mesh: group.mesh,
                        model: model_matrix(planet.position, PLANET_SCALE, self.angle, planet.axis),
                        color: group.color,
                    })
                }),
        );
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}
