//! Draw instances and per-category appearance
//!
//! The field produces one [`Instance`] per visible object every frame. The
//! renderer turns each instance into a uniform upload and a draw call.

use std::ops::Range;

use glam::{Mat4, Vec3};

/// The meshes a scene object can be drawn with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    /// Used for every star
    Asteroid,
    /// The player ship at the origin
    Ship,
    /// Planet with a ring
    PlanetRing,
    /// Plain round planet
    PlanetRound,
}

impl MeshKind {
    /// All mesh kinds, in load order
    pub const ALL: [MeshKind; 4] = [
        MeshKind::Asteroid,
        MeshKind::Ship,
        MeshKind::PlanetRing,
        MeshKind::PlanetRound,
    ];

    /// OBJ file name inside the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            MeshKind::Asteroid => "asteroid.obj",
            MeshKind::Ship => "ship.obj",
            MeshKind::PlanetRing => "planetRing.obj",
            MeshKind::PlanetRound => "planetRound.obj",
        }
    }
}

/// RGBA color
pub type Color = [f32; 4];

/// Star color (brown)
pub const STAR_COLOR: Color = [0.8, 0.4, 0.2, 1.0];

/// Ship color (red)
pub const SHIP_COLOR: Color = [1.0, 0.0, 0.0, 1.0];

/// Uniform scale applied to stars
pub const STAR_SCALE: f32 = 0.2;

/// Uniform scale applied to the ship
pub const SHIP_SCALE: f32 = 5.0;

/// Uniform scale applied to planets
pub const PLANET_SCALE: f32 = 2.0;

/// Fixed spin axis of the ship
pub const SHIP_AXIS: Vec3 = Vec3::Y;

/// A range of planet pool indices sharing a mesh and color
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetGroup {
    /// Pool indices in this group
    pub indices: Range<usize>,
    /// Mesh used by the group
    pub mesh: MeshKind,
    /// Color used by the group
    pub color: Color,
}

/// Planet groups by pool index
///
/// Only the first twelve planets belong to a group; the rest of the pool
/// is simulated but never drawn.
pub static PLANET_GROUPS: [PlanetGroup; 4] = [
    PlanetGroup {
        indices: 0..3,
        mesh: MeshKind::PlanetRing,
        color: [0.93, 0.82, 0.0, 1.0],
    },
    PlanetGroup {
        indices: 3..6,
        mesh: MeshKind::PlanetRound,
        color: [0.0, 0.5, 0.9, 1.0],
    },
    PlanetGroup {
        indices: 6..9,
        mesh: MeshKind::PlanetRound,
        color: [0.0, 0.5, 0.5, 1.0],
    },
    PlanetGroup {
        indices: 9..12,
        mesh: MeshKind::PlanetRing,
        color: [0.8, 0.0, 0.6, 1.0],
    },
];

/// Look up the group a planet index belongs to
pub fn planet_group(index: usize) -> Option<&'static PlanetGroup> {
    PLANET_GROUPS.iter().find(|group| group.indices.contains(&index))
}

/// One draw of a mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    /// Mesh to draw
    pub mesh: MeshKind,
    /// Model matrix
    pub model: Mat4,
    /// RGBA color
    pub color: Color,
}

/// Build a model matrix: translate, then scale, then spin around `axis`
///
/// `axis` must be unit length.
#[inline]
pub fn model_matrix(position: Vec3, scale: f32, angle: f32, axis: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_scale(Vec3::splat(scale))
        * Mat4::from_axis_angle(axis, angle)
}
