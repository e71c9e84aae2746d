//! Millisecond timing
//!
//! Everything here reads time through [`TickSource`], so game loops can run
//! against the wall clock or a hand-advanced clock in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic millisecond counter
pub trait TickSource {
    fn ticks_ms(&self) -> u64;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn ticks_ms(&self) -> u64 {
        (**self).ticks_ms()
    }
}

/// Wall clock, zero at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn ticks_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl TickSource for ManualClock {
    fn ticks_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Stopwatch with pause support
///
/// - stopped: reads 0
/// - running: reads time since `start`, minus any paused spans
/// - paused: reads the value frozen at `pause`
#[derive(Debug)]
pub struct Timer<C: TickSource> {
    clock: C,
    start_ticks: u64,
    paused_ticks: u64,
    started: bool,
    paused: bool,
}

impl<C: TickSource> Timer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            start_ticks: 0,
            paused_ticks: 0,
            started: false,
            paused: false,
        }
    }

    /// Start (or restart) from zero
    pub fn start(&mut self) {
        self.started = true;
        self.paused = false;
        self.start_ticks = self.clock.ticks_ms();
        self.paused_ticks = 0;
    }

    pub fn stop(&mut self) {
        self.started = false;
        self.paused = false;
        self.start_ticks = 0;
        self.paused_ticks = 0;
    }

    /// No-op unless running
    pub fn pause(&mut self) {
        if self.started && !self.paused {
            self.paused = true;
            self.paused_ticks = self.clock.ticks_ms().saturating_sub(self.start_ticks);
            self.start_ticks = 0;
        }
    }

    /// No-op unless paused
    pub fn unpause(&mut self) {
        if self.started && self.paused {
            self.paused = false;
            self.start_ticks = self.clock.ticks_ms().saturating_sub(self.paused_ticks);
            self.paused_ticks = 0;
        }
    }

    /// Elapsed milliseconds
    pub fn ticks(&self) -> u64 {
        match (self.started, self.paused) {
            (false, _) => 0,
            (true, true) => self.paused_ticks,
            (true, false) => self.clock.ticks_ms().saturating_sub(self.start_ticks),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.started && self.paused
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Frames averaged by [`FpsCounter`]
const FPS_SAMPLES: usize = 60;

/// Rolling frame rate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [u64; FPS_SAMPLES],
    index: usize,
    count: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0; FPS_SAMPLES],
            index: 0,
            count: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a presented frame at `now_ms`
    pub fn record(&mut self, now_ms: u64) {
        self.frame_times[self.index] = now_ms;
        self.index = (self.index + 1) % FPS_SAMPLES;
        self.count = (self.count + 1).min(FPS_SAMPLES);
    }

    /// Frames per second between the oldest and newest recorded frame
    ///
    /// 0 until two frames with distinct timestamps have been recorded.
    pub fn fps(&self) -> f32 {
        if self.count < 2 {
            return 0.0;
        }
        let newest = self.frame_times[(self.index + FPS_SAMPLES - 1) % FPS_SAMPLES];
        let oldest = if self.count == FPS_SAMPLES {
            self.frame_times[self.index]
        } else {
            self.frame_times[0]
        };
        let elapsed = newest.saturating_sub(oldest);
        if elapsed == 0 {
            return 0.0;
        }
        (self.count - 1) as f32 * 1000.0 / elapsed as f32
    }
}

/// Milliseconds left to wait so a frame lasts `target_ms`; 0 when over budget
#[inline]
pub fn frame_delay(target_ms: u64, elapsed_ms: u64) -> u64 {
    target_ms.saturating_sub(elapsed_ms)
}

/// Caps the frame rate by sleeping out the remainder of each frame
#[derive(Debug)]
pub struct FrameLimiter<C: TickSource> {
    timer: Timer<C>,
    frame_ms: u64,
}

impl<C: TickSource> FrameLimiter<C> {
    pub fn new(clock: C, target_fps: u32) -> Self {
        Self {
            timer: Timer::new(clock),
            frame_ms: 1000 / u64::from(target_fps.max(1)),
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.timer.start();
    }

    /// Time still owed to the current frame
    pub fn remaining_ms(&self) -> u64 {
        frame_delay(self.frame_ms, self.timer.ticks())
    }

    /// Sleep out the rest of the frame, returning how long was slept
    pub fn end_frame(&mut self) -> u64 {
        let delay = self.remaining_ms();
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_stopped_reads_zero() {
        let clock = ManualClock::new(500);
        let timer = Timer::new(&clock);
        clock.advance(100);
        assert_eq!(timer.ticks(), 0);
        assert!(!timer.is_started());
    }

    #[test]
    fn test_timer_runs_and_stops() {
        let clock = ManualClock::new(1000);
        let mut timer = Timer::new(&clock);
        timer.start();
        clock.advance(250);
        assert_eq!(timer.ticks(), 250);
        timer.stop();
        assert_eq!(timer.ticks(), 0);
    }

    #[test]
    fn test_pause_freezes_and_unpause_resumes() {
        let clock = ManualClock::new(0);
        let mut timer = Timer::new(&clock);
        timer.start();
        clock.advance(100);
        timer.pause();
        assert!(timer.is_paused());
        clock.advance(5000);
        assert_eq!(timer.ticks(), 100);

        timer.unpause();
        assert!(!timer.is_paused());
        clock.advance(40);
        assert_eq!(timer.ticks(), 140);
    }

    #[test]
    fn test_pause_when_stopped_is_noop() {
        let clock = ManualClock::new(0);
        let mut timer = Timer::new(&clock);
        timer.pause();
        assert!(!timer.is_paused());
        timer.unpause();
        assert_eq!(timer.ticks(), 0);
    }

    #[test]
    fn test_restart_resets() {
        let clock = ManualClock::new(0);
        let mut timer = Timer::new(&clock);
        timer.start();
        clock.advance(300);
        timer.pause();
        timer.start();
        assert!(!timer.is_paused());
        assert_eq!(timer.ticks(), 0);
    }

    #[test]
    fn test_fps_partial_window() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        for i in 0..10 {
            fps.record(i * 20);
        }
        assert_eq!(fps.fps(), 50.0);
    }

    #[test]
    fn test_fps_full_window() {
        let mut fps = FpsCounter::new();
        for i in 0..100 {
            fps.record(i * 10);
        }
        assert!((fps.fps() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_delay_saturates() {
        assert_eq!(frame_delay(16, 10), 6);
        assert_eq!(frame_delay(16, 16), 0);
        assert_eq!(frame_delay(16, 40), 0);
    }

    #[test]
    fn test_limiter_remaining() {
        let clock = ManualClock::new(0);
        let mut limiter = FrameLimiter::new(&clock, 50);
        assert_eq!(limiter.frame_ms(), 20);
        limiter.begin_frame();
        clock.advance(5);
        assert_eq!(limiter.remaining_ms(), 15);
        clock.advance(30);
        assert_eq!(limiter.end_frame(), 0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.ticks_ms();
        let b = clock.ticks_ms();
        assert!(b >= a);
    }
}
