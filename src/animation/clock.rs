//! Per-entity frame index advanced by accumulated elapsed time.
use serde::Serialize;

use crate::core::errors::ArenaError;

/// Timing shared by every animated entity in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    frame_duration_ms: f32,
    frame_count: usize,
}

impl AnimationTiming {
    pub fn new(frame_duration_ms: f32, frame_count: usize) -> Result<Self, ArenaError> {
        if frame_count == 0 {
            return Err(ArenaError::ZeroFrameCount);
        }
        Ok(Self {
            frame_duration_ms: frame_duration_ms.max(1.0),
            frame_count,
        })
    }

    pub fn frame_duration_ms(&self) -> f32 {
        self.frame_duration_ms
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AnimationClock {
    frame_index: usize,
    frame_timer_ms: f32,
}

impl AnimationClock {
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_timer_ms(&self) -> f32 {
        self.frame_timer_ms
    }

    /// Advances at most one frame per call. An idle entity snaps back to frame 0.
    pub fn advance(&mut self, elapsed_ms: f32, active: bool, timing: &AnimationTiming) {
        if !active {
            self.reset();
            return;
        }

        self.frame_timer_ms += elapsed_ms.max(0.0);
        if self.frame_timer_ms > timing.frame_duration_ms {
            self.frame_timer_ms = 0.0;
            self.frame_index = (self.frame_index + 1) % timing.frame_count;
        }
    }

    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.frame_timer_ms = 0.0;
    }
}
