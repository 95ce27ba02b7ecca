/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed simulation steps.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Upper bound on steps per frame, so a stalled host cannot queue unbounded work.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time and return how many fixed steps to run.
    /// Negative frame deltas count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Leftover fraction of a step (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        if self.dt <= 0.0 {
            0.0
        } else {
            self.accumulator / self.dt
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn exact_frame_is_one_step() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(DT), 1);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(DT * 0.6), 0);
        assert_eq!(ts.accumulate(DT * 0.6), 1);
        assert!(ts.alpha() > 0.1 && ts.alpha() < 0.3, "alpha {}", ts.alpha());
    }

    #[test]
    fn long_frame_is_capped() {
        let mut ts = FixedTimestep::new(DT, 4);
        assert_eq!(ts.accumulate(1.0), 4);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn reset_drops_remainder() {
        let mut ts = FixedTimestep::new(DT, 10);
        ts.accumulate(DT * 0.9);
        ts.reset();
        assert_eq!(ts.accumulate(DT * 0.5), 0);
    }
}
