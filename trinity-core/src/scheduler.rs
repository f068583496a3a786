pub mod error;
pub mod queue;
pub mod types;
pub mod worker;

pub mod prelude {
    pub use super::error::SchedulerError;
    pub use super::types::{MAX_DURATION, MIN_DURATION, TaskId};
    pub use super::worker::Scheduler;
}
