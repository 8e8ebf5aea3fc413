use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

// ─── Types ───────────────────────────────────────────────────────

/// Per-client admission state. Created lazily on first contact.
#[derive(Debug, Clone, Copy)]
struct ClientAdmission {
    window_start: Instant,
    request_count: u32,
}

/// Fixed-window admission control for the stats query path, keyed by
/// client IP.
///
/// The window is unusual: while `request_count < limit`, requests are
/// allowed WITHOUT consulting elapsed time, so a client can spend its
/// whole budget arbitrarily fast no matter how old the window is. The
/// elapsed check only happens once the budget is exhausted; after the
/// window has strictly aged past `period`, the next request resets it
/// to `{now, 1}`. At exactly `period` elapsed the request is denied.
///
/// `strict_window` opts into the conventional variant that also
/// resets a stale window before the budget check.
pub struct RateLimiter {
    clients: Mutex<HashMap<String, ClientAdmission>>,
    limit: u32,
    period: Duration,
    strict_window: bool,
}

// ─── Impl ────────────────────────────────────────────────────────

impl RateLimiter {
    pub fn new(limit: u32, period: Duration, strict_window: bool) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            limit,
            period,
            strict_window,
        }
    }

    /// Admission decision for one request from `client_id`, now.
    pub fn check(&self, client_id: &str) -> bool {
        self.check_at(client_id, Instant::now())
    }

    /// Same decision with an explicit clock, so window boundaries can
    /// be exercised deterministically.
    pub fn check_at(&self, client_id: &str, now: Instant) -> bool {
        let fresh = ClientAdmission {
            window_start: now,
            request_count: 1,
        };

        let mut clients = self.clients.lock();
        match clients.entry(client_id.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(fresh);
                true
            }
            Entry::Occupied(mut slot) => {
                let client = slot.get_mut();

                if self.strict_window && now.duration_since(client.window_start) > self.period {
                    *client = fresh;
                    return true;
                }

                if client.request_count < self.limit {
                    client.request_count += 1;
                    return true;
                }

                // Budget exhausted: the window only resets once it has
                // aged strictly past the period. A tie at exactly
                // `period` denies.
                if now.duration_since(client.window_start) <= self.period {
                    return false;
                }
                *client = fresh;
                true
            }
        }
    }

    #[cfg(test)]
    fn request_count(&self, client_id: &str) -> Option<u32> {
        self.clients.lock().get(client_id).map(|c| c.request_count)
    }
}

// ─── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u32 = 20;
    const PERIOD: Duration = Duration::from_secs(60);

    fn limiter() -> RateLimiter {
        RateLimiter::new(LIMIT, PERIOD, false)
    }

    #[test]
    fn full_budget_then_deny_then_reset() {
        let limiter = limiter();
        let t0 = Instant::now();

        // 20 instant requests all pass.
        for i in 0..LIMIT {
            assert!(limiter.check_at("10.0.0.1", t0), "request {i} denied");
        }

        // 21st immediately after is denied.
        assert!(!limiter.check_at("10.0.0.1", t0));

        // 61 units later the window has aged out: allowed, and the
        // count restarts at 1, never 0.
        let later = t0 + Duration::from_secs(61);
        assert!(limiter.check_at("10.0.0.1", later));
        assert_eq!(limiter.request_count("10.0.0.1"), Some(1));
    }

    #[test]
    fn boundary_at_exact_period_is_denied() {
        let limiter = limiter();
        let t0 = Instant::now();
        for _ in 0..LIMIT {
            assert!(limiter.check_at("10.0.0.2", t0));
        }

        // elapsed == period → deny; infinitesimally past → allow.
        assert!(!limiter.check_at("10.0.0.2", t0 + PERIOD));
        assert!(limiter.check_at("10.0.0.2", t0 + PERIOD + Duration::from_nanos(1)));
    }

    #[test]
    fn below_limit_ignores_window_age() {
        // The literal behaviour: a stale window does not reset while
        // budget remains, so counts keep accumulating across periods.
        let limiter = limiter();
        let t0 = Instant::now();

        for i in 0..10 {
            assert!(limiter.check_at("10.0.0.3", t0 + Duration::from_secs(i * 120)));
        }
        assert_eq!(limiter.request_count("10.0.0.3"), Some(10));
    }

    #[test]
    fn strict_window_resets_stale_windows_early() {
        let limiter = RateLimiter::new(LIMIT, PERIOD, true);
        let t0 = Instant::now();

        for _ in 0..10 {
            assert!(limiter.check_at("10.0.0.4", t0));
        }
        // Past the period with budget left: strict mode starts a
        // fresh window instead of continuing the old count.
        assert!(limiter.check_at("10.0.0.4", t0 + Duration::from_secs(61)));
        assert_eq!(limiter.request_count("10.0.0.4"), Some(1));
    }

    #[test]
    fn clients_are_tracked_independently() {
        let limiter = limiter();
        let t0 = Instant::now();
        for _ in 0..LIMIT {
            assert!(limiter.check_at("10.0.0.5", t0));
        }
        assert!(!limiter.check_at("10.0.0.5", t0));

        // A different client is unaffected.
        assert!(limiter.check_at("10.0.0.6", t0));
    }
}
