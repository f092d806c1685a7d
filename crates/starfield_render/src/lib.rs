//! Starfield rendering library
//!
//! This crate draws a [`starfield_core::Starfield`] with wgpu and overlays an
//! egui panel for the projection settings.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ScenePipeline`] - Depth-shaded instance rendering
//! - [`mesh::MeshLibrary`] - GPU buffers for every scene mesh
//! - [`ui::UiOverlay`] - egui integration and the projection panel

pub mod context;
pub mod error;
pub mod mesh;
pub mod pipeline;
pub mod ui;

pub use error::RenderError;

// Re-export core types for convenience
pub use starfield_core::{Instance, MeshKind, ProjectionMode, ProjectionSettings, Starfield};
