//! Local sliding-window throttling for sensitive attempts.
//!
//! Best-effort only: state lives in memory for the lifetime of one session
//! and the backend enforces its own limits independently.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Maximum attempts per user and kind within [`ATTEMPT_WINDOW`].
pub const MAX_ATTEMPTS: usize = 5;

/// Trailing window over which attempts are counted.
pub const ATTEMPT_WINDOW: Duration = Duration::from_secs(3600);

/// The kinds of attempt the limiter tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptKind {
    OtpRequest,
    SecurityAnswer,
}

/// Sliding-window attempt counter keyed by `(user_id, kind)`.
#[derive(Debug, Default)]
pub struct RateLimiter {
    attempts: HashMap<(String, AttemptKind), Vec<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Purge expired entries, then either record the attempt and allow it,
    /// or refuse without recording once the window holds [`MAX_ATTEMPTS`].
    pub fn check_and_record(&mut self, user_id: &str, kind: AttemptKind) -> bool {
        self.check_and_record_at(user_id, kind, Instant::now())
    }

    fn check_and_record_at(&mut self, user_id: &str, kind: AttemptKind, now: Instant) -> bool {
        let attempts = self
            .attempts
            .entry((user_id.to_string(), kind))
            .or_default();
        attempts.retain(|at| now.duration_since(*at) < ATTEMPT_WINDOW);
        if attempts.len() >= MAX_ATTEMPTS {
            return false;
        }
        attempts.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixth_attempt_within_window_is_refused() {
        let mut limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..MAX_ATTEMPTS {
            assert!(limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, now));
        }
        assert!(!limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, now));
    }

    #[test]
    fn test_window_expiry_allows_again() {
        let mut limiter = RateLimiter::new();
        let start = Instant::now();
        for _ in 0..MAX_ATTEMPTS {
            assert!(limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, start));
        }
        assert!(!limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, start));

        let later = start + ATTEMPT_WINDOW + Duration::from_secs(1);
        assert!(limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, later));
    }

    #[test]
    fn test_kinds_and_users_are_tracked_separately() {
        let mut limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..MAX_ATTEMPTS {
            assert!(limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, now));
        }
        assert!(!limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, now));
        assert!(limiter.check_and_record_at("ACC1", AttemptKind::SecurityAnswer, now));
        assert!(limiter.check_and_record_at("ACC2", AttemptKind::OtpRequest, now));
    }

    #[test]
    fn test_refused_attempt_is_not_recorded() {
        let mut limiter = RateLimiter::new();
        let start = Instant::now();
        for _ in 0..MAX_ATTEMPTS {
            limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, start);
        }
        // A refused attempt must not extend the window.
        let mid = start + ATTEMPT_WINDOW / 2;
        assert!(!limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, mid));
        let after = start + ATTEMPT_WINDOW + Duration::from_secs(1);
        assert!(limiter.check_and_record_at("ACC1", AttemptKind::OtpRequest, after));
    }
}
