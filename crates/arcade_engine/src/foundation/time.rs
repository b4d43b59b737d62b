//! Frame timing and frame-rate statistics

/// Snapshot of the timing values produced for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Time since the previous frame in seconds
    pub delta_time: f32,
    /// Instantaneous frame rate for this frame
    pub fps: f32,
    /// Mean of every instantaneous frame rate recorded since startup
    pub average_fps: f32,
}

/// Per-process frame timing state
///
/// Owned by the frame loop and advanced exactly once per frame. The running
/// average is a lifetime mean: it accumulates every sample and is never reset
/// or windowed.
#[derive(Debug, Clone, Default)]
pub struct FrameTiming {
    current_time: f64,
    previous_time: f64,
    delta_time: f32,
    fps: f32,
    fps_sum: f64,
    samples: u64,
}

impl FrameTiming {
    /// Create timing state with the previous timestamp at zero
    ///
    /// The windowing clock starts at zero when it is initialised, so the first
    /// frame's delta covers everything since that point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to a new timestamp (seconds on the platform clock)
    pub fn advance(&mut self, now: f64) -> FrameSample {
        self.current_time = now;
        let delta = now - self.previous_time;
        self.previous_time = now;
        self.record_delta(delta as f32)
    }

    /// Record a frame with an explicit delta time
    ///
    /// A zero or negative delta keeps the previous instantaneous frame rate and
    /// leaves the running average untouched.
    pub fn record_delta(&mut self, delta_time: f32) -> FrameSample {
        self.delta_time = delta_time;

        if delta_time > 0.0 {
            self.fps = 1.0 / delta_time;
            self.fps_sum += f64::from(self.fps);
            self.samples += 1;
        } else {
            log::trace!("Non-positive frame delta {delta_time}, frame rate not updated");
        }

        self.sample()
    }

    /// Timing values of the most recent frame
    pub fn sample(&self) -> FrameSample {
        FrameSample {
            delta_time: self.delta_time,
            fps: self.fps,
            average_fps: self.average_fps(),
        }
    }

    /// Time since the previous frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Timestamp of the most recent frame
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Instantaneous frame rate of the most recent frame
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Lifetime-average frame rate
    pub fn average_fps(&self) -> f32 {
        if self.samples == 0 {
            0.0
        } else {
            (self.fps_sum / self.samples as f64) as f32
        }
    }

    /// Number of frames that contributed to the average
    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fps_is_reciprocal_of_delta() {
        let mut timing = FrameTiming::new();
        let sample = timing.record_delta(0.25);
        assert_relative_eq!(sample.fps, 4.0);
        assert_relative_eq!(sample.average_fps, 4.0);
    }

    #[test]
    fn test_zero_delta_does_not_update_fps() {
        let mut timing = FrameTiming::new();
        timing.record_delta(0.5);

        let sample = timing.record_delta(0.0);
        assert!(sample.fps.is_finite());
        assert_relative_eq!(sample.fps, 2.0);
        assert_eq!(timing.sample_count(), 1);

        let sample = timing.record_delta(-0.01);
        assert_relative_eq!(sample.average_fps, 2.0);
        assert_eq!(timing.sample_count(), 1);
    }

    #[test]
    fn test_zero_delta_on_first_frame() {
        let mut timing = FrameTiming::new();
        let sample = timing.advance(0.0);
        assert_eq!(sample.fps, 0.0);
        assert_eq!(sample.average_fps, 0.0);
    }

    #[test]
    fn test_sixty_frames_at_sixty_hz() {
        let mut timing = FrameTiming::new();
        for _ in 0..60 {
            timing.record_delta(1.0 / 60.0);
        }
        assert_relative_eq!(timing.fps(), 60.0, epsilon = 1e-3);
        assert_relative_eq!(timing.average_fps(), 60.0, epsilon = 1e-3);
        assert_eq!(timing.sample_count(), 60);
    }

    #[test]
    fn test_average_is_mean_of_samples() {
        let deltas = [0.1_f32, 0.05, 0.02, 0.5];
        let expected = deltas.iter().map(|dt| 1.0 / dt).sum::<f32>() / deltas.len() as f32;

        let mut forward = FrameTiming::new();
        deltas.iter().for_each(|dt| {
            forward.record_delta(*dt);
        });

        let mut reversed = FrameTiming::new();
        deltas.iter().rev().for_each(|dt| {
            reversed.record_delta(*dt);
        });

        assert_relative_eq!(forward.average_fps(), expected, epsilon = 1e-3);
        assert_relative_eq!(reversed.average_fps(), forward.average_fps(), epsilon = 1e-4);
    }

    #[test]
    fn test_advance_uses_previous_timestamp() {
        let mut timing = FrameTiming::new();
        timing.advance(1.0);
        let sample = timing.advance(1.5);
        assert_relative_eq!(sample.delta_time, 0.5);
        assert_relative_eq!(timing.current_time(), 1.5);
        // 1 fps from the first frame, 2 fps from the second
        assert_relative_eq!(sample.average_fps, 1.5);
    }
}
