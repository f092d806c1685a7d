//! Rendering pipeline components
//!
//! One depth-tested pipeline draws every instance with its own slice of a
//! dynamic-offset uniform buffer.

pub mod scene_pipeline;
pub mod types;

pub use scene_pipeline::{align_up, ScenePipeline};
pub use types::{FrameUniforms, ObjectUniforms, Vertex};
