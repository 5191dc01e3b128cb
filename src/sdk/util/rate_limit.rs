use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub fn ors_limiter(per_minute: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)))
}

/// Blocks the current thread until the limiter hands out a permit.
pub fn wait_for_permit(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let wait = not_until.wait_time_from(clock.now());
        log::debug!("Rate limit reached, sleeping {:?}", wait);
        std::thread::sleep(wait);
    }
}
