use std::collections::VecDeque;

use sandbox_common::FrameTime;

/// Rolling average of frame times over the last `window` frames.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f32>,
    window: usize,
    sum: f32,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FrameStats {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            sum: 0.0,
            frames: 0,
        }
    }

    pub fn record(&mut self, time: FrameTime) {
        if self.samples.len() == self.window {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
        self.samples.push_back(time.delta);
        self.sum += time.delta;
        self.frames += 1;
    }

    /// Average frame time in seconds, zero before the first sample.
    pub fn average_delta(&self) -> f32 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f32
        }
    }

    pub fn fps(&self) -> f32 {
        let avg = self.average_delta();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} FPS ({:.2} ms)",
            self.fps(),
            self.average_delta() * 1000.0
        )
    }
}
