//! Virtual-time task queue.
//!
//! The orchestrator never blocks. Every delayed effect is a task with an
//! ABSOLUTE due time; the host advances the clock and due tasks run in
//! (due time, insertion order). Ordering between stages comes only from
//! their delays.
//!
//! ```text
//! now ──┬── schedule_in(200, A) ──> due 200
//!       ├── schedule_in(0,   B)   ──> due now   (runs first)
//!       └── schedule_in(200, C) ──> due 200   (runs after A)
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed: BinaryHeap is a max-heap, we want the earliest entry on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded timer queue with a virtual clock.
pub struct Scheduler<T> {
    /// Current clock time (milliseconds).
    now_ms: u64,
    /// Insertion counter, breaks ties between equal due times.
    next_seq: u64,
    /// Pending tasks.
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::with_capacity(64),
        }
    }

    /// Current clock time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedules a task `delay_ms` after the current time.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), task);
    }

    /// Schedules a task at an absolute time (clamped to now).
    pub fn schedule_at(&mut self, due_ms: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due_ms: due_ms.max(self.now_ms),
            seq,
            task,
        });
    }

    /// Due time of the next pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|entry| entry.due_ms)
    }

    /// Pops the next task due at or before `until`, moving the clock to its
    /// due time.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        if self.next_due()? > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.task)
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
