//! Starfield application library
//!
//! Configuration, input mapping and the systems driven by the binary's
//! event loop.

pub mod config;
pub mod input;
pub mod systems;
