//! Pure countdown arithmetic behind the focus timer.

use std::fmt;

/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remains on the clock.
    Running { remaining_seconds: u32 },
    /// The countdown reached zero and has been rewound to its full length.
    Finished,
}

/// Seconds left in a session of fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: u32,
    remaining_seconds: u32,
}

impl Countdown {
    /// A full countdown of `total_seconds`.
    pub fn new(total_seconds: u32) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Fraction of the session already elapsed, in `0.0..=1.0`.
    pub fn elapsed_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        f64::from(self.total_seconds - self.remaining_seconds) / f64::from(self.total_seconds)
    }

    /// Rewind to the full length.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.reset();
            return Tick::Finished;
        }
        Tick::Running {
            remaining_seconds: self.remaining_seconds,
        }
    }
}

/// Renders the remaining time as `MM:SS`.
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        write!(f, "{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn finishes_after_exactly_total_ticks() {
        let mut countdown = Countdown::new(3);

        assert_eq!(countdown.tick(), Tick::Running { remaining_seconds: 2 });
        assert_eq!(countdown.tick(), Tick::Running { remaining_seconds: 1 });
        assert_eq!(countdown.tick(), Tick::Finished);
        assert_eq!(countdown.remaining_seconds(), 3);
    }

    #[rstest]
    #[case(1500, "25:00")]
    #[case(61, "01:01")]
    #[case(7200, "120:00")]
    fn renders_minutes_and_seconds(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(Countdown::new(seconds).to_string(), expected);
    }

    #[rstest]
    fn reports_elapsed_fraction() {
        let mut countdown = Countdown::new(4);
        countdown.tick();
        assert!((countdown.elapsed_fraction() - 0.25).abs() < f64::EPSILON);
    }
}
