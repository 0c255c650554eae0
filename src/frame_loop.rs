//! Drives a [`Simulator`] once per frame.
//!
//! A [`TickSource`] decides when the next frame is due. A
//! [`CancellationToken`] stops the loop between two steps, never during
//! one, so a cancelled loop leaves the simulator in a consistent state.

use crate::simulator::{snapshot::FrameSnapshot, Simulator};
use log::debug;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

/// Source of frame ticks.
pub trait TickSource {
    /// Waits until the next frame is due. Returns `false` once no more
    /// frames will come.
    fn next_tick(&mut self) -> bool;
}

/// Yields a fixed number of ticks without waiting.
#[derive(Clone, Debug)]
pub struct FixedTicks {
    remaining: u64,
}

impl FixedTicks {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl TickSource for FixedTicks {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Yields ticks paced at a fixed interval, optionally for a limited number
/// of frames.
#[derive(Clone, Debug)]
pub struct IntervalTicks {
    interval: Duration,
    next: Instant,
    remaining: Option<u64>,
}

impl IntervalTicks {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
            remaining: None,
        }
    }

    /// Paced at `fps` frames per second.
    pub fn per_second(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl TickSource for IntervalTicks {
    fn next_tick(&mut self) -> bool {
        match &mut self.remaining {
            Some(0) => return false,
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        // Skip missed frames instead of bursting to catch up.
        self.next = Instant::now().max(self.next) + self.interval;
        true
    }
}

/// Shared flag that stops a [`FrameLoop`]. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Why a [`FrameLoop`] stopped, and after how many frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    Cancelled { frames: u64 },
    Exhausted { frames: u64 },
}

pub struct FrameLoop<T: TickSource> {
    ticks: T,
    token: CancellationToken,
}

impl<T: TickSource> FrameLoop<T> {
    pub fn new(ticks: T, token: CancellationToken) -> Self {
        Self { ticks, token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Steps `simulator` once per tick and hands every snapshot to
    /// `on_frame`, until the ticks run out or the token is cancelled.
    pub fn run<F>(&mut self, simulator: &mut Simulator, mut on_frame: F) -> LoopExit
    where
        F: FnMut(&FrameSnapshot),
    {
        let mut frames = 0;
        loop {
            if self.token.is_cancelled() {
                debug!("Frame loop cancelled after {0} frames", frames);
                return LoopExit::Cancelled { frames };
            }
            if !self.ticks.next_tick() {
                return LoopExit::Exhausted { frames };
            }
            // Cancellation may arrive while waiting for the tick.
            if self.token.is_cancelled() {
                debug!("Frame loop cancelled after {0} frames", frames);
                return LoopExit::Cancelled { frames };
            }
            let snapshot = simulator.step();
            frames += 1;
            on_frame(&snapshot);
        }
    }
}
