use std::time::Duration;

/// Lower bound between two candidate requests against the scraped source.
pub const MIN_REQUEST_DELAY: Duration = Duration::from_millis(300);

/// Pause inserted before every candidate request.
#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    /// Intervals below [`MIN_REQUEST_DELAY`] are raised to it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_REQUEST_DELAY),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(MIN_REQUEST_DELAY)
    }
}

#[async_trait::async_trait]
impl Delay for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.interval).await;
    }
}

/// Zero-length delay for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait::async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}
