//! Frame clock and the attract/repel phase it selects.

/// Behavior phase of the particle force pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Pairs within range pull together; speed cap and center gravity boosted.
    Attract,
    /// Pairs that get too close push apart. Never left once entered.
    Repel,
}

impl Phase {
    pub fn is_attract(self) -> bool {
        self == Phase::Attract
    }
}

/// Monotonic frame counter. One tick is one rendered particle frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    frame: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames elapsed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Phase for the current frame given the attract window length.
    pub fn phase(&self, attract_phase_frames: u64) -> Phase {
        if self.frame < attract_phase_frames {
            Phase::Attract
        } else {
            Phase::Repel
        }
    }

    /// Advance one frame and return the phase that frame runs in.
    ///
    /// Callers must use the returned phase for both the force pass and the
    /// speed cap of that frame.
    pub fn advance(&mut self, attract_phase_frames: u64) -> Phase {
        self.frame = self.frame.saturating_add(1);
        self.phase(attract_phase_frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_switches_at_threshold() {
        let mut clock = SimClock::new();
        let phases: Vec<Phase> = (0..5).map(|_| clock.advance(3)).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Attract,
                Phase::Attract,
                Phase::Repel,
                Phase::Repel,
                Phase::Repel
            ]
        );
    }

    #[test]
    fn test_phase_is_monotonic() {
        let mut clock = SimClock::new();
        let mut seen_repel = false;
        for _ in 0..1_000 {
            match clock.advance(240) {
                Phase::Repel => seen_repel = true,
                Phase::Attract => assert!(!seen_repel, "returned to attract after repel"),
            }
        }
        assert!(seen_repel);
        assert_eq!(clock.frame(), 1_000);
    }

    #[test]
    fn test_zero_window_is_always_repel() {
        let mut clock = SimClock::new();
        assert_eq!(clock.phase(0), Phase::Repel);
        assert_eq!(clock.advance(0), Phase::Repel);
    }
}
