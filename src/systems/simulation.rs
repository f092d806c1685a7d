//! Simulation system
//!
//! Measures frame time and advances the starfield.

use std::time::Instant;

use starfield_core::Starfield;

/// Longest step applied in one frame, in seconds
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Drives [`Starfield::update`] from wall-clock time
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds since the previous call, capped at [`MAX_FRAME_TIME`]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        // Cap dt so a stall (window drag, breakpoint) does not flush the field
        raw_dt.min(MAX_FRAME_TIME)
    }

    /// Advance the field by the elapsed frame time, returning the step used
    pub fn update(&mut self, field: &mut Starfield) -> f32 {
        let dt = self.tick();
        field.update(dt);
        dt
    }

    /// Restart timing, e.g. after the window was hidden
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_delta_time_measured() {
        let mut sim = SimulationSystem::new();
        std::thread::sleep(Duration::from_millis(20));
        let dt = sim.tick();
        assert!(dt >= 0.02);
        assert!(dt <= MAX_FRAME_TIME);
    }

    #[test]
    fn test_delta_time_capped() {
        let mut sim = SimulationSystem::new();
        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(sim.tick(), MAX_FRAME_TIME);
    }

    #[test]
    fn test_update_advances_field() {
        let mut sim = SimulationSystem::new();
        let mut field = Starfield::with_seed(9);
        std::thread::sleep(Duration::from_millis(10));
        let dt = sim.update(&mut field);
        assert!(dt > 0.0);
        assert!(field.angle() > 0.0);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
