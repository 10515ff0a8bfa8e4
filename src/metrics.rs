//! Process-wide game counters.
//! Cheap relaxed atomics; a [Snapshot] is logged when a session ends.
use std::sync::atomic::{AtomicU64, Ordering};

static SESSIONS_STARTED: AtomicU64 = AtomicU64::new(0);
static SESSIONS_ENDED: AtomicU64 = AtomicU64::new(0);
static TURNS: AtomicU64 = AtomicU64::new(0);
static IDIOMS_DRAWN: AtomicU64 = AtomicU64::new(0);
static REJECTIONS: AtomicU64 = AtomicU64::new(0);
static HINTS: AtomicU64 = AtomicU64::new(0);
static SKIPS: AtomicU64 = AtomicU64::new(0);
static POOL_EXHAUSTIONS: AtomicU64 = AtomicU64::new(0);

/// Record a new session and return its 1-based sequence number.
pub fn record_session_start() -> u64 {
    SESSIONS_STARTED.fetch_add(1, Ordering::Relaxed) + 1
}
pub fn record_session_end() {
    SESSIONS_ENDED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_turns() {
    TURNS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_idioms_drawn() {
    IDIOMS_DRAWN.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_rejections() {
    REJECTIONS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_hints() {
    HINTS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_skips() {
    SKIPS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_pool_exhaustions() {
    POOL_EXHAUSTIONS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub sessions_started: u64,
    pub sessions_ended: u64,
    pub turns: u64,
    pub idioms_drawn: u64,
    pub rejections: u64,
    pub hints: u64,
    pub skips: u64,
    pub pool_exhaustions: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        sessions_started: SESSIONS_STARTED.load(Ordering::Relaxed),
        sessions_ended: SESSIONS_ENDED.load(Ordering::Relaxed),
        turns: TURNS.load(Ordering::Relaxed),
        idioms_drawn: IDIOMS_DRAWN.load(Ordering::Relaxed),
        rejections: REJECTIONS.load(Ordering::Relaxed),
        hints: HINTS.load(Ordering::Relaxed),
        skips: SKIPS.load(Ordering::Relaxed),
        pool_exhaustions: POOL_EXHAUSTIONS.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are global and other tests run in parallel, so only check
    // that values move forward.
    #[test]
    fn counters_are_monotonic() {
        let before = snapshot();
        let id = record_session_start();
        inc_turns();
        inc_idioms_drawn();
        inc_rejections();
        inc_hints();
        inc_skips();
        inc_pool_exhaustions();
        record_session_end();
        let after = snapshot();
        assert!(id >= 1);
        assert!(after.sessions_started > before.sessions_started);
        assert!(after.turns > before.turns);
        assert!(after.idioms_drawn > before.idioms_drawn);
        assert!(after.rejections > before.rejections);
        assert!(after.hints > before.hints);
        assert!(after.skips > before.skips);
        assert!(after.pool_exhaustions > before.pool_exhaustions);
        assert!(after.sessions_ended > before.sessions_ended);
    }
}
