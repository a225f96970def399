use instant::Instant;
use std::time::Duration;

/// Monotonic time since start, fed to [`Arbiter::process_frame`](crate::Arbiter::process_frame).
///
/// `instant` keeps this working under wasm where `std::time::Instant` panics.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}
