//! TMDB API request pacing.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Spaces outgoing TMDB requests by a fixed minimum interval.
///
/// Page renders fan out into several concurrent TMDB calls; the limiter
/// hands out consecutive slots so bursts stay under the API's soft limit.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbRateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Earliest instant the next request may start.
    next_slot: Option<Instant>,
}

impl TmdbRateLimiter {
    /// Creates a limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a limiter with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Waits for the next free slot and reserves the one after it.
    pub async fn wait(&mut self) {
        if self.min_interval.is_zero() {
            return;
        }

        if let Some(slot) = self.next_slot {
            let now = Instant::now();
            if slot > now {
                tokio::time::sleep(slot.duration_since(now)).await;
            }
        }

        self.next_slot = Instant::now().checked_add(self.min_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_does_not_wait() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_secs(1));

        // Act
        let start = Instant::now();
        limiter.wait().await;

        // Assert
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_consecutive_requests_are_spaced() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;

        // Assert
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_zero_interval_never_reserves() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::ZERO);

        // Act
        limiter.wait().await;

        // Assert
        assert!(limiter.next_slot.is_none());
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let limiter = TmdbRateLimiter::default_interval();

        // Assert
        assert_eq!(limiter.min_interval, Duration::from_millis(25));
    }
}
