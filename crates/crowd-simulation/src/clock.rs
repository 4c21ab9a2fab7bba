/// Tracks simulation time: a monotonic tick counter and elapsed seconds.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    time_step: f64,
    elapsed: f64,
}

impl SimClock {
    /// Create a new clock at tick 0 with the given seconds per tick.
    pub fn new(time_step: f64) -> Self {
        Self {
            tick: 0,
            time_step,
            elapsed: 0.0,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.elapsed += self.time_step;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds simulated per tick.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Total simulated seconds since the start of the run.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(0.05);
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn clock_advance_increments() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.advance(), 3);
        assert!((clock.elapsed() - 1.5).abs() < f64::EPSILON);
        assert!((clock.time_step() - 0.5).abs() < f64::EPSILON);
    }
}
