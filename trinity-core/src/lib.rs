use mimalloc::MiMalloc;

/// Global allocator.
///
/// Every subsystem in this crate exists to avoid paying allocation cost on
/// a hot path (recycling resources, dispatching tasks, matching orders), so
/// the allocator itself is held to the same standard.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod book;
pub mod pool;
pub mod scheduler;

pub mod prelude {
    pub use super::book::prelude::*;
    pub use super::pool::prelude::*;
    pub use super::scheduler::prelude::*;
}
