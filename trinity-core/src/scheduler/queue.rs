use super::types::TaskId;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One occurrence of a task sitting in the pending queue.
///
/// `seq` is a monotonically increasing admission counter used purely as
/// a tie-break among entries with identical `start_time`: entries are
/// otherwise ordered by deadline alone, so two tasks admitted for the
/// same instant run in the order they were scheduled.
pub(crate) struct PendingEntry {
    pub(crate) id: TaskId,
    pub(crate) start_time: Instant,
    pub(crate) seq: u64,
    pub(crate) running_time: Duration,
    pub(crate) body: Arc<dyn Fn() + Send + Sync>,
}

impl PartialEq for PendingEntry {
    fn eq(&self, other: &Self) -> bool {
        self.start_time == other.start_time && self.seq == other.seq
    }
}

impl Eq for PendingEntry {}

impl PartialOrd for PendingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingEntry {
    /// Reversed so that `BinaryHeap` (a max-heap) surfaces the
    /// earliest `start_time` — and, among ties, the earliest admission
    /// — as its `peek`/`pop`.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .start_time
            .cmp(&self.start_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
