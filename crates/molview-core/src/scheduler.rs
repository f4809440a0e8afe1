use std::time::{Duration, Instant};

/// The host's "schedule next frame" capability.
///
/// After `request_frame`, the host calls `Viewer::on_frame` once at its next
/// refresh opportunity.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Deterministic scheduler: frames fire only when the host calls [`advance`].
///
/// [`advance`]: ManualScheduler::advance
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of `request_frame` calls received.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Start a refresh interval. Returns `true` when a frame was requested
    /// and the host should invoke the frame callback.
    pub fn advance(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if self.pending {
            log::warn!("Frame requested while another is already pending");
        }
        self.pending = true;
        self.requests += 1;
    }
}

/// Real-time scheduler pacing frames at a fixed interval.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    interval: Duration,
    last_frame: Option<Instant>,
    pending: bool,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: None,
            pending: false,
        }
    }

    pub fn with_target_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// When the pending frame is due. `None` means nothing is scheduled and
    /// the host can wait for input.
    pub fn next_frame_time(&self) -> Option<Instant> {
        if !self.pending {
            return None;
        }
        Some(match self.last_frame {
            Some(last) => last + self.interval,
            None => Instant::now(),
        })
    }

    /// Returns `true` if the pending frame is due at `now`; the request is
    /// consumed and the host should invoke the frame callback.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        let due = self.last_frame.map_or(true, |last| now >= last + self.interval);
        if due {
            self.pending = false;
            self.last_frame = Some(now);
        }
        due
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}
