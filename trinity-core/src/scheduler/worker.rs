use super::error::SchedulerError;
use super::queue::PendingEntry;
use super::types::{MAX_DURATION, MIN_DURATION, TaskId};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct State {
    pending: BinaryHeap<PendingEntry>,
    repeated: HashMap<TaskId, Duration>,
    executed: HashSet<TaskId>,
    next_id: TaskId,
    next_seq: u64,
    running: bool,
}

struct Inner {
    state: Mutex<State>,
    cv: Condvar,
    shutdown_deadline: Instant,
}

impl Inner {
    /// Removes the pending occurrence of `id`, if any, via linear scan
    /// and rebuild. Cancellation is not assumed to be the hot path, so
    /// this trades an O(n) rebuild for not needing a secondary index
    /// into the heap.
    fn remove_pending(state: &mut State, id: TaskId) -> bool {
        let items = std::mem::take(&mut state.pending).into_vec();
        let before = items.len();
        let kept: Vec<_> = items.into_iter().filter(|e| e.id != id).collect();
        let removed = kept.len() != before;
        state.pending = BinaryHeap::from(kept);
        removed
    }
}

/// A single-threaded, deadline-ordered task dispatcher.
///
/// One dedicated worker thread runs the event loop: it sleeps until the
/// earliest pending deadline (or the scheduler's shutdown deadline,
/// whichever is sooner), wakes precisely on admission, cancellation, or
/// that deadline, and never polls.
///
/// `Scheduler` is not `Clone` — there is one worker thread per instance,
/// and dropping it joins that thread.
pub struct Scheduler {
    inner: Arc<Inner>,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Starts a new scheduler whose clock origin is `origin`. The event
    /// loop begins running immediately on a dedicated worker thread and
    /// terminates automatically at `origin + MAX_DURATION` if it is
    /// never dropped first.
    pub fn new(origin: Instant) -> Self {
        let inner = Arc::new(Inner {
            state: Mutex::new(State {
                pending: BinaryHeap::new(),
                repeated: HashMap::new(),
                executed: HashSet::new(),
                next_id: 1,
                next_seq: 0,
                running: true,
            }),
            cv: Condvar::new(),
            shutdown_deadline: origin + MAX_DURATION,
        });

        let worker_inner = Arc::clone(&inner);
        let worker = thread::spawn(move || Self::run(worker_inner));

        Self {
            inner,
            worker: Some(worker),
        }
    }

    /// Schedules `task` to run once at `start`. `running_time` is
    /// caller-declared duration metadata for the occurrence (not
    /// enforced by the loop, which never measures how long a task body
    /// actually takes).
    pub fn schedule_once<F>(
        &self,
        start: Instant,
        running_time: Duration,
        task: F,
    ) -> Result<TaskId, SchedulerError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock().unwrap();
        if !state.running {
            return Err(SchedulerError::ShutDown);
        }

        let id = Self::next_id(&mut state);
        let seq = Self::next_seq(&mut state);
        state.pending.push(PendingEntry {
            id,
            start_time: start,
            seq,
            running_time,
            body: Arc::new(task),
        });
        drop(state);
        self.inner.cv.notify_all();
        Ok(id)
    }

    /// Schedules `task` to run every `interval`, first at `start`. Each
    /// subsequent occurrence is enqueued for `previous_start + interval`
    /// only after the previous occurrence has finished running.
    pub fn schedule_repeated<F>(
        &self,
        start: Instant,
        interval: Duration,
        running_time: Duration,
        task: F,
    ) -> Result<TaskId, SchedulerError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock().unwrap();
        if !state.running {
            return Err(SchedulerError::ShutDown);
        }

        let id = Self::next_id(&mut state);
        let seq = Self::next_seq(&mut state);
        state.repeated.insert(id, interval);
        state.pending.push(PendingEntry {
            id,
            start_time: start,
            seq,
            running_time,
            body: Arc::new(task),
        });
        drop(state);
        self.inner.cv.notify_all();
        Ok(id)
    }

    /// Attempts to cancel `task_id`, distinguishing a one-shot task
    /// whose single execution has already begun from a `task_id` that
    /// was never scheduled.
    pub fn cancel(&self, task_id: TaskId) -> Result<(), SchedulerError> {
        let mut state = self.inner.state.lock().unwrap();

        let is_repeating = state.repeated.contains_key(&task_id);
        if state.executed.contains(&task_id) && !is_repeating {
            return Err(SchedulerError::AlreadyExecuted);
        }

        let repeat_stopped = state.repeated.remove(&task_id).is_some();
        let pending_removed = Inner::remove_pending(&mut state, task_id);

        if repeat_stopped || pending_removed {
            drop(state);
            self.inner.cv.notify_all();
            return Ok(());
        }

        Err(SchedulerError::NotFound)
    }

    fn next_id(state: &mut State) -> TaskId {
        let id = state.next_id;
        state.next_id += 1;
        id
    }

    fn next_seq(state: &mut State) -> u64 {
        let seq = state.next_seq;
        state.next_seq += 1;
        seq
    }

    /// The event loop. Runs entirely on the worker thread.
    fn run(inner: Arc<Inner>) {
        loop {
            let mut state = inner.state.lock().unwrap();
            if !state.running {
                return;
            }

            // Step 1: compute next_time under the lock.
            let next_time = match state.pending.peek() {
                Some(entry) if entry.start_time < inner.shutdown_deadline => entry.start_time,
                _ => inner.shutdown_deadline,
            };

            let now = Instant::now();
            let wait_for = next_time.saturating_duration_since(now);

            // Step 2: wait with a wakeup predicate — keep sleeping
            // while nothing earlier than `next_time` has appeared and
            // we're still running.
            let (mut state, timeout) = inner
                .cv
                .wait_timeout_while(state, wait_for, |s| {
                    s.running
                        && s.pending
                            .peek()
                            .is_none_or(|e| e.start_time >= next_time)
                })
                .unwrap();

            if !state.running {
                return;
            }

            let now = Instant::now();

            // Step 4: shutdown timeout fired and nothing preempted it.
            if timeout.timed_out()
                && now >= inner.shutdown_deadline
                && state
                    .pending
                    .peek()
                    .is_none_or(|e| e.start_time >= inner.shutdown_deadline)
            {
                state.running = false;
                return;
            }

            // Step 5: only reachable after a cancellation emptied the queue.
            if state.pending.is_empty() {
                continue;
            }

            // Step 6: pop and run the head if it is due (or within slack).
            let due = state
                .pending
                .peek()
                .is_some_and(|e| e.start_time <= now + MIN_DURATION);
            if !timeout.timed_out() && !due {
                continue;
            }

            let entry = state.pending.pop().unwrap();
            state.executed.insert(entry.id);
            drop(state);

            (entry.body)();

            let mut state = inner.state.lock().unwrap();
            if let Some(&interval) = state.repeated.get(&entry.id) {
                let seq = Self::next_seq(&mut state);
                state.pending.push(PendingEntry {
                    id: entry.id,
                    start_time: entry.start_time + interval,
                    seq,
                    running_time: entry.running_time,
                    body: Arc::clone(&entry.body),
                });
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            state.running = false;
        }
        self.inner.cv.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
