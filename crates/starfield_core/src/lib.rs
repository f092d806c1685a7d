//! Core types for the starfield demo
//!
//! This crate holds everything that does not touch the GPU:
//!
//! - [`Starfield`] - Fixed pools of stars and planets plus the shared spin angle
//! - [`Body`] - Position and rotation axis of one recycled object
//! - [`RespawnPolicy`] - How a body is resampled after passing the camera
//! - [`Instance`] - One draw of a mesh with a model matrix and color
//! - [`ProjectionSettings`] - Perspective/orthographic state edited from the UI
//! - [`MeshData`] - OBJ geometry loaded from the assets directory

mod asset_error;
mod body;
mod field;
mod instance;
mod mesh;
mod projection;
mod spawn;

pub use asset_error::AssetError;
pub use body::{Body, DEPTH_SPEED, FAR_DEPTH, NEAR_THRESHOLD};
pub use field::{advance_angle, Starfield, PLANET_COUNT, SPIN_DEGREES_PER_SECOND, STAR_COUNT};
pub use instance::{
    model_matrix, planet_group, Color, Instance, MeshKind, PlanetGroup, PLANET_GROUPS,
};
pub use mesh::MeshData;
pub use projection::{
    aspect_ratio, clamp_fov, view_matrix, ProjectionMode, ProjectionSettings, DEFAULT_FOV,
    FOV_RANGE,
};
pub use spawn::{place_planet, PlanetRespawn, RespawnPolicy, StarRespawn};

// Re-export math types used in the public API
pub use glam::{Mat4, Vec3};
