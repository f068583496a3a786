/// Errors returned by [`Scheduler`](super::worker::Scheduler) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler's event loop has already shut down; no further
    /// tasks can be admitted.
    ShutDown,
    /// `cancel` was called with a `task_id` that was never scheduled
    /// (or has aged out of the executed-set retention window).
    NotFound,
    /// `cancel` was called on a one-shot task whose single execution has
    /// already begun and which is not (or is no longer) a repeating
    /// task — there is nothing left to stop.
    AlreadyExecuted,
}
