use std::time::{Duration, Instant};
use trinity_core::prelude::*;

/// A book wide enough for the prices these tests use, at tick size 1.
pub fn fresh_book() -> OrderBook {
    OrderBook::new(100_000, 1).unwrap()
}

/// Blocks the calling thread until `f()` is true or `timeout` elapses,
/// without assuming anything about scheduler internals.
pub fn wait_until(timeout: Duration, mut f: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if f() {
            return true;
        }
        std::thread::yield_now();
    }
    f()
}
