use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Time elapsed since the clock was created, in seconds (unclamped).
    ///
    /// This is the animation time handed to idle handlers.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not
/// produce a huge step. Elapsed time is not clamped; it always tracks the
/// wall clock since start.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with 0.1 ms / 250 ms delta clamps.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Seconds since the clock was created.
    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FrameClock {
        FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn frame_index_counts_ticks() {
        let mut c = clock();
        let base = c.start;
        assert_eq!(c.tick_at(base).frame_index, 0);
        assert_eq!(c.tick_at(base).frame_index, 1);
        assert_eq!(c.tick_at(base).frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_on_both_ends() {
        let mut c = clock();
        let base = c.start;

        let ft = c.tick_at(base);
        assert!(approx(ft.dt, 0.001));

        let ft = c.tick_at(base + Duration::from_secs(5));
        assert!(approx(ft.dt, 0.1));
    }

    #[test]
    fn elapsed_tracks_start_without_clamping() {
        let mut c = clock();
        let base = c.start;

        c.tick_at(base + Duration::from_millis(500));
        let ft = c.tick_at(base + Duration::from_secs(3));
        assert!(approx(ft.elapsed, 3.0));
        assert!(approx(ft.dt, 0.1));
    }
}
