//! Application systems
//!
//! The event loop drives three systems: simulation timing, the window and
//! the GPU renderer.

mod render;
mod simulation;
mod window;

pub use render::RenderSystem;
pub use simulation::{SimulationSystem, MAX_FRAME_TIME};
pub use window::{WindowError, WindowSystem};
