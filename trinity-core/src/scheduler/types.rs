use std::time::Duration;

/// Opaque, monotonically increasing task identifier, starting from 1.
pub type TaskId = u64;

/// Upper bound on how long a scheduler will run before its event loop
/// shuts itself down automatically, measured from the `origin` instant
/// passed to [`Scheduler::new`](super::worker::Scheduler::new).
pub const MAX_DURATION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Slack window used when deciding whether the head of the pending
/// queue is "due": a task whose `start_time` is within `MIN_DURATION`
/// of now is popped and run immediately rather than re-arming the
/// condition variable for a few nanoseconds. Avoids racing the timer
/// when an admission asks for an execution at (effectively) "now".
pub const MIN_DURATION: Duration = Duration::from_micros(500);
