use std::collections::HashMap;
use std::time::{Duration, Instant};

// With IP-derived keys the map grows with every new caller, so stale
// entries are swept on a fixed cadence of checks.
const PRUNE_EVERY: usize = 1024;

/// A simple rate limiter using a sliding window algorithm.
///
/// Tracks request timestamps per client key (the caller's IP for the chat
/// endpoint) to decide whether a new request is allowed.
pub struct RateLimiter {
    /// Stores timestamps of requests for each client key.
    requests: HashMap<String, Vec<Instant>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
    /// Checks performed since the last stale-client sweep.
    checks_since_prune: usize,
}

impl RateLimiter {
    /// Creates a new `RateLimiter` allowing `limit` requests per `window`.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
            checks_since_prune: 0,
        }
    }

    /// Checks if a request from a given client is allowed.
    ///
    /// If the request is allowed it is recorded and the function returns
    /// `true`. Otherwise it returns `false`.
    pub fn check(&mut self, key: &str) -> bool {
        let now = Instant::now();
        let window_start = now - self.window;

        self.checks_since_prune += 1;
        if self.checks_since_prune >= PRUNE_EVERY {
            self.prune(window_start);
        }

        let client_requests = self.requests.entry(key.to_string()).or_default();

        // Remove timestamps older than the window
        client_requests.retain(|&timestamp| timestamp > window_start);

        if client_requests.len() < self.limit {
            client_requests.push(now);
            true
        } else {
            false
        }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }

    fn prune(&mut self, window_start: Instant) {
        self.requests.retain(|_, timestamps| {
            timestamps.retain(|&t| t > window_start);
            !timestamps.is_empty()
        });
        self.checks_since_prune = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        for _ in 0..5 {
            assert!(limiter.check("client1"));
        }
        assert!(!limiter.check("client1"));
    }

    #[test]
    fn test_rate_limiter_resets_after_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("client2"));
        assert!(limiter.check("client2"));
        assert!(!limiter.check("client2"));

        thread::sleep(Duration::from_millis(60));

        assert!(limiter.check("client2"));
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        assert!(limiter.check("alice"));
        assert!(!limiter.check("alice"));
        assert!(limiter.check("bob"));
    }

    #[test]
    fn test_prune_drops_expired_clients() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(10));
        limiter.check("short-lived");
        assert_eq!(limiter.tracked_clients(), 1);

        thread::sleep(Duration::from_millis(20));
        limiter.prune(Instant::now() - Duration::from_millis(10));

        assert_eq!(limiter.tracked_clients(), 0);
    }
}
