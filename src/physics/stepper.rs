/// Fixed-timestep accumulator: frames hand in their (variable) elapsed
/// time, physics consumes it in equal slices. A cap on the frame delta
/// keeps a long stall from producing a spiral of catch-up steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_frame_delta: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_frame_delta: step * 8.0,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feeds a frame's elapsed seconds into the accumulator. Non-finite or
    /// negative deltas are dropped.
    pub fn advance(&mut self, frame_delta: f32) {
        if !frame_delta.is_finite() || frame_delta <= 0.0 {
            return;
        }
        self.accumulator += frame_delta.min(self.max_frame_delta);
    }

    /// Takes one fixed step out of the accumulator if enough time has been
    /// banked. Call in a loop until it returns false.
    pub fn tick(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Fraction of a step left over, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
