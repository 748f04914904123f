use std::time::{Duration, Instant};

/// Number of cells in the progress bar.
pub const BAR_LENGTH: usize = 10;
pub const BAR_FILL: char = '█';
const BAR_EMPTY: &str = "--";

/// Source of wall-clock readings.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Timing of the most recent iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    /// Duration of the last iteration.
    pub elapsed: Duration,
    /// Duration since the first iteration started.
    pub total_elapsed: Duration,
    /// Projected remaining duration.
    pub estimated: Duration,
}

/// Formats whole seconds as `HH:MM:SS`. Hours are not wrapped.
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (mins, secs) = (secs / 60, secs % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Filled cells for `iteration` out of `total`. An empty run counts as full.
pub fn filled_length(iteration: usize, total: usize) -> usize {
    (BAR_LENGTH * iteration)
        .checked_div(total)
        .unwrap_or(BAR_LENGTH)
        .min(BAR_LENGTH)
}

pub fn progress_bar(iteration: usize, total: usize) -> String {
    let filled = filled_length(iteration, total);
    let mut bar: String = std::iter::repeat(BAR_FILL).take(filled).collect();
    bar.push_str(&BAR_EMPTY.repeat(BAR_LENGTH - filled));
    bar
}

/// The progress line shown as the chart title, e.g.
/// `50.0% |█████----------| 2/4 [00:00:03 <-- 00:00:04  2.0000s/it]`.
pub fn progress_message(iteration: usize, total: usize, timing: &Timing) -> String {
    let percent = if total == 0 {
        100.0
    } else {
        100.0 * iteration as f64 / total as f64
    };
    format!(
        "{:.1}% |{}| {}/{} [{} <-- {}  {:.4}s/it]",
        percent,
        progress_bar(iteration, total),
        iteration,
        total,
        format_time(timing.total_elapsed),
        format_time(timing.estimated),
        timing.elapsed.as_secs_f64(),
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// A clock that only moves when told to. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "00:00:00");
        assert_eq!(format_time(Duration::from_secs_f64(3725.9)), "01:02:05");
        assert_eq!(format_time(Duration::from_secs(360_000)), "100:00:00");
    }

    #[test]
    fn test_filled_length_is_monotonic_and_full_at_end() {
        let total = 7;
        let lengths: Vec<usize> = (0..=total).map(|i| filled_length(i, total)).collect();
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        assert!(lengths[..total].iter().all(|&l| l < BAR_LENGTH));
        assert_eq!(lengths[total], BAR_LENGTH);
        assert_eq!(filled_length(3, 0), BAR_LENGTH);
    }

    #[test]
    fn test_progress_bar_layout() {
        assert_eq!(progress_bar(5, 10), "█████----------");
        assert_eq!(progress_bar(0, 3), "-".repeat(20));
        assert_eq!(progress_bar(3, 3), "█".repeat(10));
    }

    #[test]
    fn test_progress_message_format() {
        let timing = Timing {
            elapsed: Duration::from_millis(1500),
            total_elapsed: Duration::from_secs(61),
            estimated: Duration::from_secs(3),
        };
        assert_eq!(
            progress_message(2, 4, &timing),
            "50.0% |█████----------| 2/4 [00:01:01 <-- 00:00:03  1.5000s/it]"
        );
    }

    #[test]
    fn test_manual_clock_shares_time() {
        let clock = testing::ManualClock::new();
        let other = clock.clone();
        let before = other.now();
        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now() - before, Duration::from_secs(2));
    }
}
